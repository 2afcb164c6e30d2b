//! `prefix.map`: per-pitch prefix/suffix substitution.
//!
//! Each line is `<note><delim><prefix><delim><suffix>`, e.g. `C5\t\t↑`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::{Read, Write};

use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::VoicebankError;
use super::note_name::{self, OctaveNumbering};
use crate::charset;

/// Options for reading and writing `prefix.map`.
#[derive(Debug, Clone, Copy)]
pub struct PrefixMapOptions {
    pub encoding: &'static Encoding,
    pub delimiter: char,
    /// Lines starting with this character (after leading whitespace) are skipped.
    pub comment: Option<char>,
    /// Spell accidentals with sharps instead of flats when encoding.
    pub sharps: bool,
    /// Octave numbering of note names, C5 = 60 unless changed.
    pub octaves: OctaveNumbering,
    /// Order of lines when encoding.
    pub order: fn(&u8, &u8) -> Ordering,
}

impl Default for PrefixMapOptions {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            delimiter: '\t',
            comment: Some('#'),
            sharps: false,
            octaves: OctaveNumbering::C0,
            order: u8::cmp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prefix {
    pub prefix: String,
    pub suffix: String,
}

impl Prefix {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Wrap `lyric` with this prefix and suffix.
    pub fn apply(&self, lyric: &str) -> String {
        format!("{}{}{}", self.prefix, lyric, self.suffix)
    }
}

/// MIDI note number → prefix/suffix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixMap {
    entries: BTreeMap<u8, Prefix>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry for `note`, replacing any previous one.
    pub fn insert(&mut self, note: u8, prefix: Prefix) -> Option<Prefix> {
        self.entries.insert(note, prefix)
    }

    pub fn get(&self, note: u8) -> Option<&Prefix> {
        self.entries.get(&note)
    }

    /// The sample alias for `lyric` sung at `note`. Unmapped notes leave the
    /// lyric unchanged.
    pub fn alias_for(&self, note: u8, lyric: &str) -> String {
        match self.get(note) {
            Some(p) => p.apply(lyric),
            None => lyric.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Prefix)> {
        self.entries.iter().map(|(n, p)| (*n, p))
    }

    pub fn decode(bytes: &[u8], options: PrefixMapOptions) -> Result<Self, VoicebankError> {
        let text = charset::decode(bytes, options.encoding);
        Self::parse(&text, options)
    }

    pub fn read_from(
        mut reader: impl Read,
        options: PrefixMapOptions,
    ) -> Result<Self, VoicebankError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::decode(&bytes, options)
    }

    /// Parse already-decoded text. A repeated note keeps its last line.
    pub fn parse(text: &str, options: PrefixMapOptions) -> Result<Self, VoicebankError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut map = Self::new();

        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if options.comment.is_some_and(|c| trimmed.starts_with(c)) {
                continue;
            }

            let fields: Vec<&str> = line.splitn(3, options.delimiter).collect();
            let [note, prefix, suffix] = fields[..] else {
                return Err(VoicebankError::InvalidPrefixLine { line: idx + 1 });
            };

            map.insert(
                note_name::parse(note, options.octaves)?,
                Prefix::new(prefix.trim(), suffix.trim()),
            );
        }

        debug!(entries = map.len(), "decoded prefix.map");
        Ok(map)
    }

    /// Render the map as text, ordered by `options.order`.
    pub fn to_text(&self, options: PrefixMapOptions) -> String {
        let mut notes: Vec<u8> = self.entries.keys().copied().collect();
        notes.sort_by(options.order);

        let mut out = String::new();
        for note in notes {
            let Some(p) = self.entries.get(&note) else {
                continue;
            };
            out.push_str(&note_name::format(note, options.sharps, options.octaves));
            out.push(options.delimiter);
            out.push_str(&p.prefix);
            out.push(options.delimiter);
            out.push_str(&p.suffix);
            out.push('\n');
        }
        out
    }

    pub fn encode(&self, options: PrefixMapOptions) -> Vec<u8> {
        let text = self.to_text(options);
        charset::encode(&text, options.encoding).into_owned()
    }

    pub fn write_to(
        &self,
        mut writer: impl Write,
        options: PrefixMapOptions,
    ) -> Result<(), VoicebankError> {
        writer.write_all(&self.encode(options))?;
        Ok(())
    }
}

impl FromIterator<(u8, Prefix)> for PrefixMap {
    fn from_iter<I: IntoIterator<Item = (u8, Prefix)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
