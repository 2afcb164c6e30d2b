//! Error types for UST decoding.

use thiserror::Error;

use crate::ini::Malformed;

/// An error that aborted a UST decode. No partial file is ever returned.
#[derive(Debug, Error)]
pub enum UstError {
    /// The section/line framework could not be parsed at all.
    #[error("malformed UST at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A mandatory key is absent or empty.
    #[error("missing required field {field} in section {section}")]
    MissingField { section: String, field: &'static str },

    #[error("missing or empty Tempo in #SETTING")]
    MissingTempo,

    /// A field is present but does not hold the expected numeric value.
    #[error("invalid number for {field}: {raw:?}")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("invalid value at index {index} of {field}: {raw:?}")]
    InvalidFloatList {
        field: &'static str,
        index: usize,
        raw: String,
    },

    #[error("invalid boolean for {field}: {raw:?}")]
    InvalidBool { field: &'static str, raw: String },

    #[error("envelope must contain at least 7 values, got {0}")]
    TooFewEnvelopeValues(usize),

    #[error("envelope must contain at most 9 values, got {0}")]
    TooManyEnvelopeValues(usize),

    #[error("invalid pitch bend mode: {0:?}")]
    InvalidMode(String),

    #[error("invalid pitch bend type: {0:?}")]
    InvalidPitchBendType(String),

    #[error("invalid version string: {0:?}")]
    InvalidVersion(String),

    #[error("unknown character encoding: {0:?}")]
    UnknownEncoding(String),

    /// Any failure inside a note section, tagged with the section name.
    #[error("note {section}: {source}")]
    Note {
        section: String,
        #[source]
        source: Box<UstError>,
    },

    #[error("failed to read UST: {0}")]
    Io(#[from] std::io::Error),
}

impl UstError {
    pub(crate) fn in_note(self, section: &str) -> Self {
        Self::Note {
            section: section.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through note-section wrappers.
    pub fn root(&self) -> &UstError {
        match self {
            Self::Note { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<Malformed> for UstError {
    fn from(m: Malformed) -> Self {
        Self::Malformed {
            line: m.line,
            reason: m.reason,
        }
    }
}
