//! Error types for voicebank text formats.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoicebankError {
    /// An oto line did not have exactly six values after the `=`.
    #[error("invalid oto entry for {filename:?}: expected 6 values, got {got}")]
    InvalidOtoEntry { filename: String, got: usize },

    #[error("invalid {field} value for {filename:?}: {raw:?}")]
    InvalidOtoValue {
        field: &'static str,
        filename: String,
        raw: String,
    },

    #[error("line {line}: missing '=' separator")]
    MissingSeparator { line: usize },

    #[error("line {line}: expected note, prefix and suffix fields")]
    InvalidPrefixLine { line: usize },

    #[error("invalid note name: {0:?}")]
    InvalidNoteName(String),

    #[error("note {name:?} is outside the MIDI range (got {midi})")]
    NoteOutOfRange { name: String, midi: i64 },

    /// `install.txt` is not a readable INI file.
    #[error("malformed install.txt at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("voicebank I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<crate::ini::Malformed> for VoicebankError {
    fn from(m: crate::ini::Malformed) -> Self {
        Self::Malformed {
            line: m.line,
            reason: m.reason,
        }
    }
}
