//! UST (UTAU Sequence Text) decoding.
//!
//! Raw bytes → charset sniff → INI sections → typed [`File`]. The raw section
//! tree is discarded once the file is built.

pub mod envelope;
pub mod error;
pub mod file;
pub mod note;
pub mod pitchbend;
pub mod settings;
pub mod value;
pub mod version;

pub use envelope::Envelope;
pub use error::UstError;
pub use file::File;
pub use note::{is_rest_lyric, Note};
pub use pitchbend::{PitchBend, Point};
pub use settings::Settings;
pub use value::{EnvelopeValue, Interpolation};
pub use version::Version;

use encoding_rs::Encoding;

use crate::charset;

/// Options for decoding UST bytes.
#[derive(Debug, Clone, Copy)]
pub struct UstOptions {
    /// Encoding used when the file declares no `Charset=`.
    pub fallback_encoding: &'static Encoding,
    /// How many leading bytes are searched for the declaration.
    pub sniff_len: usize,
}

impl Default for UstOptions {
    fn default() -> Self {
        Self {
            fallback_encoding: charset::legacy_default(),
            sniff_len: charset::DEFAULT_SNIFF_LEN,
        }
    }
}

/// Decode UST bytes with default options.
pub fn decode(bytes: &[u8]) -> Result<File, UstError> {
    File::decode(bytes)
}
