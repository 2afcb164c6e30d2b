//! utau-codec: typed decoders and encoders for UTAU voice-synthesis files.
//!
//! - [`ust`] reads UST sequence files into a [`ust::File`].
//! - [`sequence`] projects a file onto an absolute timeline with envelope and
//!   pitch curves.
//! - [`voicebank`] reads and writes `oto.ini` and `prefix.map`, plus the
//!   `character.txt` and `install.txt` metadata files.

pub mod charset;
pub mod config;
mod ini;
pub mod sequence;
pub mod ust;
pub mod voicebank;
