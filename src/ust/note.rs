//! UST note sections (`[#0000]`, `[#0001]`, ...).

use serde::{Deserialize, Serialize};

use super::envelope::Envelope;
use super::error::UstError;
use super::pitchbend::PitchBend;
use super::value::{parse_float, parse_optional_float};
use crate::ini::Section;

pub const DEFAULT_INTENSITY: f64 = 100.0;

/// Lyrics that mark a rest.
const REST_LYRICS: [&str; 2] = ["R", "-"];

/// Whether `lyric` marks a rest. Exact, case-sensitive match.
pub fn is_rest_lyric(lyric: &str) -> bool {
    REST_LYRICS.contains(&lyric)
}

/// A note of a UST file.
///
/// `None` in the optional timing fields means "use the voicebank's oto
/// value", which is not the same thing as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Duration in ticks.
    pub length: u32,
    pub lyric: String,
    /// MIDI note number (0–127).
    pub note_num: u8,
    /// Volume in percent.
    pub intensity: f64,
    /// Consonant velocity.
    pub velocity: Option<f64>,
    pub modulation: f64,
    pub pre_utterance: Option<f64>,
    pub voice_overlap: Option<f64>,
    pub start_point: Option<f64>,
    pub envelope: Option<Envelope>,
    pub pitch_bend: Option<PitchBend>,
}

impl Note {
    /// A note with only the mandatory fields set.
    pub fn new(length: u32, lyric: impl Into<String>, note_num: u8) -> Self {
        Self {
            length,
            lyric: lyric.into(),
            note_num,
            intensity: DEFAULT_INTENSITY,
            velocity: None,
            modulation: 0.0,
            pre_utterance: None,
            voice_overlap: None,
            start_point: None,
            envelope: None,
            pitch_bend: None,
        }
    }

    pub fn is_rest(&self) -> bool {
        is_rest_lyric(&self.lyric)
    }

    /// Build a note from the keys of one note section.
    pub(crate) fn from_section(sec: &Section) -> Result<Self, UstError> {
        let missing = |field: &'static str| UstError::MissingField {
            section: sec.name.clone(),
            field,
        };
        let required = |field: &'static str| match sec.get(field) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(missing(field)),
        };

        let raw_length = required("Length")?;
        let length = raw_length.parse().map_err(|_| UstError::InvalidNumber {
            field: "Length",
            raw: raw_length.to_string(),
        })?;

        let raw_note = required("NoteNum")?;
        let note_num = raw_note
            .parse::<u8>()
            .ok()
            .filter(|n| *n <= 127)
            .ok_or_else(|| UstError::InvalidNumber {
                field: "NoteNum",
                raw: raw_note.to_string(),
            })?;

        let lyric = sec.get("Lyric").ok_or_else(|| missing("Lyric"))?.trim();

        let intensity = match sec.value("Intensity") {
            "" => DEFAULT_INTENSITY,
            raw => parse_float("Intensity", raw)?,
        };

        let envelope = match sec.value("Envelope") {
            "" => None,
            raw => Some(Envelope::parse(raw)?),
        };

        let pitch_bend = if sec.has("PBS") || sec.has("PBStart") {
            Some(PitchBend::parse(
                sec.value("PBType"),
                sec.value("PBStart"),
                sec.value("PBS"),
                sec.value("PBW"),
                sec.value("PBY"),
                sec.value("PBM"),
            )?)
        } else {
            None
        };

        Ok(Self {
            length,
            lyric: lyric.to_string(),
            note_num,
            intensity,
            velocity: parse_optional_float("Velocity", sec.value("Velocity"))?,
            modulation: parse_optional_float("Modulation", sec.value("Modulation"))?
                .unwrap_or(0.0),
            pre_utterance: parse_optional_float("PreUtterance", sec.value("PreUtterance"))?,
            voice_overlap: parse_optional_float("VoiceOverlap", sec.value("VoiceOverlap"))?,
            start_point: parse_optional_float("StartPoint", sec.value("StartPoint"))?,
            envelope,
            pitch_bend,
        })
    }
}
