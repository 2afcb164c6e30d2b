//! Voicebank text formats: `oto.ini`, `prefix.map`, `character.txt` and
//! `install.txt`.
//!
//! Only the text is handled here. Locating files inside a voicebank and
//! decoding its audio are left to the caller.

pub mod character;
pub mod error;
pub mod install;
pub mod note_name;
pub mod oto;
pub mod prefix_map;

pub use character::CharacterInfo;
pub use error::VoicebankError;
pub use install::InstallInfo;
pub use oto::{Oto, OtoEntry, OtoOptions};
pub use prefix_map::{Prefix, PrefixMap, PrefixMapOptions};
