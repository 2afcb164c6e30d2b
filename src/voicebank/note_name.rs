//! Note names for prefix.map: "C5", "F#4", "Eb5", German "H5"/"Hb5".
//!
//! prefix.map files count octaves from C0 = 0, so C5 is MIDI 60 and valid
//! names run from C0 to G10 (127). [`OctaveNumbering::CMinus1`] selects the
//! C4 = 60 convention instead.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::VoicebankError;

static NOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)([A-H])([#b])?(-?\d+)$").expect("note name regex is valid")
});

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Which octave number MIDI note 0 belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OctaveNumbering {
    /// C0 = 0, C5 = 60. What prefix.map files use.
    #[default]
    #[serde(rename = "c0")]
    C0,
    /// C-1 = 0, C4 = 60.
    #[serde(rename = "c-1")]
    CMinus1,
}

impl OctaveNumbering {
    /// The octave number of MIDI notes 0–11.
    fn lowest(self) -> i64 {
        match self {
            OctaveNumbering::C0 => 0,
            OctaveNumbering::CMinus1 => -1,
        }
    }
}

/// Parse a note name into a MIDI note number.
///
/// Letters and accidentals are case-insensitive. `H` is B natural and `Hb`
/// is B flat. Names outside 0–127 are rejected, never clamped.
pub fn parse(name: &str, octaves: OctaveNumbering) -> Result<u8, VoicebankError> {
    let invalid = || VoicebankError::InvalidNoteName(name.to_string());
    let caps = NOTE_RE.captures(name.trim()).ok_or_else(invalid)?;

    let letter = caps[1].to_ascii_uppercase();
    let accidental = caps.get(2).map_or(String::new(), |m| m.as_str().to_ascii_lowercase());

    let pitch_class: i64 = match (letter.as_str(), accidental.as_str()) {
        ("C", "") => 0,
        ("C", "#") | ("D", "b") => 1,
        ("D", "") => 2,
        ("D", "#") | ("E", "b") => 3,
        ("E", "") => 4,
        ("F", "") => 5,
        ("F", "#") | ("G", "b") => 6,
        ("G", "") => 7,
        ("G", "#") | ("A", "b") => 8,
        ("A", "") => 9,
        ("A", "#") | ("B", "b") | ("H", "b") => 10,
        ("B", "") | ("H", "") => 11,
        _ => return Err(invalid()),
    };

    let octave: i64 = caps[3].parse().map_err(|_| invalid())?;
    let midi = octave
        .saturating_sub(octaves.lowest())
        .saturating_mul(12)
        .saturating_add(pitch_class);

    u8::try_from(midi)
        .ok()
        .filter(|n| *n <= 127)
        .ok_or_else(|| VoicebankError::NoteOutOfRange {
            name: name.trim().to_string(),
            midi,
        })
}

/// Format a MIDI note number, spelling accidentals as flats unless `sharps`.
pub fn format(note: u8, sharps: bool, octaves: OctaveNumbering) -> String {
    let names = if sharps { &SHARP_NAMES } else { &FLAT_NAMES };
    let octave = i64::from(note / 12) + octaves.lowest();
    format!("{}{}", names[(note % 12) as usize], octave)
}
