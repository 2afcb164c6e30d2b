//! `install.txt`: the installer manifest shipped in voicebank archives.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use super::error::VoicebankError;
use crate::charset;
use crate::ini::{IniReader, DEFAULT_SECTION};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstallInfo {
    /// Archive kind, `voiceset` for voicebanks.
    pub kind: String,
    /// Target folder name under the UTAU voice directory.
    pub folder: String,
    /// Directory inside the archive that holds the voicebank.
    pub contents_dir: String,
    pub description: String,
}

impl InstallInfo {
    pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<Self, VoicebankError> {
        Self::parse(&charset::decode(bytes, encoding))
    }

    /// Parse `install.txt` text. Keys are read from the head of the file,
    /// before any section header.
    pub fn parse(text: &str) -> Result<Self, VoicebankError> {
        let sections = IniReader::new(text).read()?;
        let Some(head) = sections.iter().find(|s| s.name == DEFAULT_SECTION) else {
            return Ok(Self::default());
        };

        Ok(Self {
            kind: head.value("type").to_string(),
            folder: head.value("folder").to_string(),
            contents_dir: head.value("contentsdir").to_string(),
            description: head.value("description").to_string(),
        })
    }
}
