//! Project settings (`[#SETTING]` block).

use serde::{Deserialize, Serialize};

use super::error::UstError;
use super::value::parse_bool;
use crate::ini::Section;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Beats per minute.
    pub tempo: f64,
    pub project_name: String,
    /// Project path (written by OpenUtau).
    pub project: String,
    /// Voicebank directory.
    pub voice_dir: String,
    /// Rendered audio output path.
    pub out_file: String,
    pub cache_dir: String,
    /// Wavtool path.
    pub tool1: String,
    /// Resampler path.
    pub tool2: String,
    /// Whether Mode2 pitch editing is enabled.
    pub mode2: bool,
}

impl Settings {
    pub(crate) fn from_section(sec: &Section) -> Result<Self, UstError> {
        let tempo = match sec.value("Tempo") {
            "" => return Err(UstError::MissingTempo),
            raw => raw
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite() && *t > 0.0)
                .ok_or_else(|| UstError::InvalidNumber {
                    field: "Tempo",
                    raw: raw.to_string(),
                })?,
        };

        let mode2 = match sec.value("Mode2") {
            "" => {
                return Err(UstError::MissingField {
                    section: sec.name.clone(),
                    field: "Mode2",
                })
            }
            raw => parse_bool("Mode2", raw)?,
        };

        let text = |key: &str| sec.value(key).to_string();

        Ok(Self {
            tempo,
            project_name: text("ProjectName"),
            project: text("Project"),
            voice_dir: text("VoiceDir"),
            out_file: text("OutFile"),
            cache_dir: text("CacheDir"),
            tool1: text("Tool1"),
            tool2: text("Tool2"),
            mode2,
        })
    }
}
