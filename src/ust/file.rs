//! File-level UST parsing: section dispatch, version and settings.

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::error::UstError;
use super::note::Note;
use super::settings::Settings;
use super::version::Version;
use super::UstOptions;
use crate::charset;
use crate::ini::{IniReader, DEFAULT_SECTION};
use crate::sequence::{project, Sequence};

const VERSION_SECTION: &str = "#VERSION";
const SETTING_SECTION: &str = "#SETTING";
const TRACKEND_SECTION: &str = "#TRACKEND";

/// Note sections are named `#` followed by digits only.
fn is_note_section(name: &str) -> bool {
    name.strip_prefix('#')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// A decoded UST file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub version: Version,
    pub settings: Settings,
    pub notes: Vec<Note>,
}

impl File {
    /// Decode raw UST bytes, sniffing the charset first.
    pub fn decode(bytes: &[u8]) -> Result<Self, UstError> {
        Self::decode_with(bytes, UstOptions::default())
    }

    pub fn decode_with(bytes: &[u8], options: UstOptions) -> Result<Self, UstError> {
        let encoding = charset::detect(bytes, options.sniff_len, options.fallback_encoding)
            .map_err(UstError::UnknownEncoding)?;
        debug!(encoding = encoding.name(), "decoding UST");
        let text = charset::decode(bytes, encoding);
        Self::parse(&text)
    }

    /// Read everything from `reader` and decode it.
    pub fn read_from(mut reader: impl Read, options: UstOptions) -> Result<Self, UstError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::decode_with(&bytes, options)
    }

    /// Parse already-decoded UST text.
    pub fn parse(text: &str) -> Result<Self, UstError> {
        let sections = IniReader::new(text)
            .with_raw_sections(&[VERSION_SECTION])
            .read()?;

        let mut version = Version::default();
        let mut settings = None;
        let mut notes = Vec::new();

        for sec in &sections {
            match sec.name.as_str() {
                DEFAULT_SECTION => {}
                VERSION_SECTION => version = Version::from_body(sec.body())?,
                SETTING_SECTION => settings = Some(Settings::from_section(sec)?),
                TRACKEND_SECTION => {
                    debug!(line = sec.line, "reached #TRACKEND");
                    break;
                }
                name if is_note_section(name) => {
                    let note = Note::from_section(sec).map_err(|e| e.in_note(name))?;
                    trace!(section = name, lyric = %note.lyric, length = note.length, "note");
                    notes.push(note);
                }
                name => warn!(section = name, line = sec.line, "unrecognized section, skipping"),
            }
        }

        Ok(Self {
            version,
            settings: settings.ok_or(UstError::MissingTempo)?,
            notes,
        })
    }

    /// Project the notes onto an absolute tick/millisecond timeline.
    pub fn sequence(&self) -> Sequence {
        project(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "[#VERSION]\nUST Version1.2\n[#SETTING]\nTempo=120\nMode2=True\n";

    #[test]
    fn note_section_names() {
        assert!(is_note_section("#0000"));
        assert!(is_note_section("#12"));
        assert!(!is_note_section("#"));
        assert!(!is_note_section("#PREV"));
        assert!(!is_note_section("#1a"));
        assert!(!is_note_section("0000"));
    }

    #[test]
    fn parse_minimal_file() {
        let src = format!("{HEADER}[#0000]\nLength=480\nLyric=a\nNoteNum=60\n[#TRACKEND]\n");
        let file = File::parse(&src).unwrap();
        assert_eq!(file.version, Version::V1_2);
        assert_eq!(file.settings.tempo, 120.0);
        assert_eq!(file.notes, vec![Note::new(480, "a", 60)]);
    }

    #[test]
    fn version_defaults_without_block() {
        let src = "[#SETTING]\nTempo=120\nMode2=True\n";
        assert_eq!(File::parse(src).unwrap().version, Version::V1_2);
    }

    #[test]
    fn version_two() {
        let src = "[#VERSION]\nUST Version2.0\n[#SETTING]\nTempo=120\nMode2=True\n";
        assert_eq!(File::parse(src).unwrap().version, Version::V2_0);
    }

    #[test]
    fn invalid_version_is_fatal() {
        let src = "[#VERSION]\nUST Version9.9\n[#SETTING]\nTempo=120\nMode2=True\n";
        assert!(matches!(File::parse(src), Err(UstError::InvalidVersion(_))));
    }

    #[test]
    fn notes_after_trackend_ignored() {
        let src = format!(
            "{HEADER}[#0000]\nLength=480\nLyric=a\nNoteNum=60\n[#TRACKEND]\n\
             [#0001]\nLength=480\nLyric=i\nNoteNum=62\n"
        );
        let file = File::parse(&src).unwrap();
        assert_eq!(file.notes.len(), 1);
    }

    #[test]
    fn unknown_sections_are_skipped() {
        let src = format!(
            "{HEADER}[#PREV]\nLength=480\n[#0000]\nLength=480\nLyric=a\nNoteNum=60\n"
        );
        let file = File::parse(&src).unwrap();
        assert_eq!(file.notes.len(), 1);
    }

    #[test]
    fn missing_setting_section() {
        let src = "[#0000]\nLength=480\nLyric=a\nNoteNum=60\n";
        assert!(matches!(File::parse(src), Err(UstError::MissingTempo)));
    }

    #[test]
    fn note_error_names_section() {
        let src = format!("{HEADER}[#0000]\nLength=480\nLyric=a\nNoteNum=60\n[#0001]\nLyric=b\n");
        let err = File::parse(&src).unwrap_err();
        match &err {
            UstError::Note { section, .. } => assert_eq!(section, "#0001"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            err.root(),
            UstError::MissingField {
                field: "Length",
                ..
            }
        ));
    }

    #[test]
    fn malformed_structure_is_fatal() {
        let src = format!("{HEADER}[#0000\nLength=480\n");
        assert!(matches!(
            File::parse(&src),
            Err(UstError::Malformed { line: 6, .. })
        ));
    }

    #[test]
    fn decode_shift_jis_by_default() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"[#0000]\nLength=480\nLyric=\x82\xa0\nNoteNum=60\n");
        let file = File::decode(&bytes).unwrap();
        assert_eq!(file.notes[0].lyric, "あ");
    }

    #[test]
    fn decode_declared_utf8() {
        let src = "[#VERSION]\nUST Version1.2\nCharset=UTF-8\n[#SETTING]\nTempo=120\nMode2=True\n\
                   [#0000]\nLength=480\nLyric=あ\nNoteNum=60\n";
        let file = File::decode(src.as_bytes()).unwrap();
        assert_eq!(file.notes[0].lyric, "あ");
    }

    #[test]
    fn decode_empty_charset_as_utf8() {
        let src = "[#VERSION]\nUST Version1.2\nCharset=\n[#SETTING]\nTempo=120\nMode2=True\n\
                   [#0000]\nLength=480\nLyric=さ\nNoteNum=60\n";
        let file = File::decode(src.as_bytes()).unwrap();
        assert_eq!(file.notes[0].lyric, "さ");
    }

    #[test]
    fn decode_unknown_charset() {
        let src = b"[#VERSION]\nCharset=nonsense\n";
        assert!(matches!(
            File::decode(src),
            Err(UstError::UnknownEncoding(ref l)) if l == "nonsense"
        ));
    }

    #[test]
    fn parse_is_deterministic() {
        let src = format!("{HEADER}[#0000]\nLength=480\nLyric=a\nNoteNum=60\nPBS=-10;1\nPBW=20\n");
        assert_eq!(File::parse(&src).unwrap(), File::parse(&src).unwrap());
    }
}
