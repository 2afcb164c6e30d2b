//! `oto.ini` sample-alignment tables.
//!
//! One entry per line: `filename=alias,offset,consonant,cutoff,preutterance,overlap`,
//! all five numbers in milliseconds.

use std::collections::HashMap;
use std::io::{Read, Write};

use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::VoicebankError;
use super::prefix_map::PrefixMap;
use crate::charset;

const VALUE_COUNT: usize = 6;

/// Options for reading and writing `oto.ini`.
#[derive(Debug, Clone, Copy)]
pub struct OtoOptions {
    pub encoding: &'static Encoding,
    /// Lines starting with this character (after leading whitespace) are skipped.
    pub comment: Option<char>,
    /// Minimum column width of each number when encoding.
    pub float_width: usize,
    /// Fixed decimal places when encoding; `None` writes the shortest exact form.
    pub float_precision: Option<usize>,
}

impl Default for OtoOptions {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            comment: None,
            float_width: 0,
            float_precision: None,
        }
    }
}

impl OtoOptions {
    fn format_float(&self, v: f64) -> String {
        let width = self.float_width;
        match self.float_precision {
            Some(precision) => format!("{v:>width$.precision$}"),
            None => format!("{v:>width$}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OtoEntry {
    /// Sample file, relative to the voicebank directory.
    pub filename: String,
    pub alias: String,
    pub offset: f64,
    pub consonant: f64,
    /// Negative values count from the offset; positive ones from the end.
    pub cutoff: f64,
    pub preutterance: f64,
    pub overlap: f64,
}

impl OtoEntry {
    fn parse_line(line: &str, line_no: usize) -> Result<Self, VoicebankError> {
        let (filename, rest) = line
            .split_once('=')
            .ok_or(VoicebankError::MissingSeparator { line: line_no })?;

        let values: Vec<&str> = rest.split(',').collect();
        if values.len() != VALUE_COUNT {
            return Err(VoicebankError::InvalidOtoEntry {
                filename: filename.to_string(),
                got: values.len(),
            });
        }

        let number = |field: &'static str, raw: &str| -> Result<f64, VoicebankError> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(0.0);
            }
            raw.parse().map_err(|_| VoicebankError::InvalidOtoValue {
                field,
                filename: filename.to_string(),
                raw: raw.to_string(),
            })
        };

        Ok(Self {
            filename: filename.to_string(),
            alias: values[0].to_string(),
            offset: number("offset", values[1])?,
            consonant: number("consonant", values[2])?,
            cutoff: number("cutoff", values[3])?,
            preutterance: number("preutterance", values[4])?,
            overlap: number("overlap", values[5])?,
        })
    }

    fn write_line(&self, out: &mut String, options: &OtoOptions) {
        out.push_str(&self.filename);
        out.push('=');
        out.push_str(&self.alias);
        for v in [
            self.offset,
            self.consonant,
            self.cutoff,
            self.preutterance,
            self.overlap,
        ] {
            out.push(',');
            out.push_str(&options.format_float(v));
        }
        out.push('\n');
    }
}

/// An ordered oto table with an alias index.
///
/// When several entries share an alias, lookups return the first one that
/// was added, also across [`Oto::merge`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<OtoEntry>", into = "Vec<OtoEntry>")]
pub struct Oto {
    entries: Vec<OtoEntry>,
    index: HashMap<String, usize>,
}

impl Oto {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: OtoEntry) {
        self.index
            .entry(entry.alias.clone())
            .or_insert(self.entries.len());
        self.entries.push(entry);
    }

    /// Append every entry of `other`. Aliases already present keep resolving
    /// to the existing entry.
    pub fn merge(&mut self, other: Oto) {
        for entry in other.entries {
            self.push(entry);
        }
    }

    pub fn get(&self, alias: &str) -> Option<&OtoEntry> {
        self.index.get(alias).map(|&i| &self.entries[i])
    }

    /// Find the sample for `lyric` sung at `note`.
    ///
    /// The pitch-specific alias from `prefix_map` is tried first, then the
    /// bare lyric.
    pub fn lookup(
        &self,
        lyric: &str,
        note: u8,
        prefix_map: Option<&PrefixMap>,
    ) -> Option<&OtoEntry> {
        prefix_map
            .map(|pm| pm.alias_for(note, lyric))
            .and_then(|alias| self.get(&alias))
            .or_else(|| self.get(lyric))
    }

    pub fn entries(&self) -> &[OtoEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OtoEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode raw `oto.ini` bytes.
    pub fn decode(bytes: &[u8], options: OtoOptions) -> Result<Self, VoicebankError> {
        let text = charset::decode(bytes, options.encoding);
        Self::parse(&text, options)
    }

    pub fn read_from(mut reader: impl Read, options: OtoOptions) -> Result<Self, VoicebankError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::decode(&bytes, options)
    }

    /// Parse already-decoded `oto.ini` text. Blank lines are skipped.
    pub fn parse(text: &str, options: OtoOptions) -> Result<Self, VoicebankError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut oto = Self::new();

        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.trim_end().is_empty() {
                continue;
            }
            if options.comment.is_some_and(|c| trimmed.starts_with(c)) {
                continue;
            }
            oto.push(OtoEntry::parse_line(line, idx + 1)?);
        }

        debug!(entries = oto.len(), aliases = oto.index.len(), "decoded oto.ini");
        Ok(oto)
    }

    /// Render the table as text, one line per entry.
    pub fn to_text(&self, options: OtoOptions) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            entry.write_line(&mut out, &options);
        }
        out
    }

    /// Render and transcode into `options.encoding`.
    pub fn encode(&self, options: OtoOptions) -> Vec<u8> {
        let text = self.to_text(options);
        charset::encode(&text, options.encoding).into_owned()
    }

    pub fn write_to(
        &self,
        mut writer: impl Write,
        options: OtoOptions,
    ) -> Result<(), VoicebankError> {
        writer.write_all(&self.encode(options))?;
        Ok(())
    }
}

impl From<Vec<OtoEntry>> for Oto {
    fn from(entries: Vec<OtoEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Oto> for Vec<OtoEntry> {
    fn from(oto: Oto) -> Self {
        oto.entries
    }
}

impl FromIterator<OtoEntry> for Oto {
    fn from_iter<I: IntoIterator<Item = OtoEntry>>(iter: I) -> Self {
        let mut oto = Self::new();
        for entry in iter {
            oto.push(entry);
        }
        oto
    }
}

impl<'a> IntoIterator for &'a Oto {
    type Item = &'a OtoEntry;
    type IntoIter = std::slice::Iter<'a, OtoEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
