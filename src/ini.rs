//! Reader for the INI subset shared by UST and `install.txt` files.
//!
//! Converts source text into an ordered list of [`Section`]s. Lines that
//! appear before the first header land in an implicit [`DEFAULT_SECTION`].
//! Sections listed as raw keep their body lines verbatim instead of being
//! split into keys (UST's `#VERSION` block is free text).

/// Name given to key lines that precede any section header.
pub(crate) const DEFAULT_SECTION: &str = "DEFAULT";

/// A structural problem with the section/line framework itself.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Malformed {
    pub line: usize,
    pub reason: String,
}

/// One `[name]` block and its contents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Section {
    pub name: String,
    /// 1-based line number of the header (0 for the implicit default section).
    pub line: usize,
    entries: Vec<(String, String)>,
    body: Vec<String>,
}

impl Section {
    fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            entries: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Value for `key`, trimmed. Duplicate keys resolve to the last one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key`, or the empty string when absent.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Verbatim body lines of a raw section.
    pub fn body(&self) -> impl Iterator<Item = &str> {
        self.body.iter().map(String::as_str)
    }
}

pub(crate) struct IniReader<'a> {
    source: &'a str,
    raw_sections: &'a [&'a str],
}

impl<'a> IniReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.strip_prefix('\u{feff}').unwrap_or(source),
            raw_sections: &[],
        }
    }

    /// Treat the named sections as free text.
    pub fn with_raw_sections(mut self, names: &'a [&'a str]) -> Self {
        self.raw_sections = names;
        self
    }

    pub fn read(&self) -> Result<Vec<Section>, Malformed> {
        let mut sections = Vec::new();
        let mut current = Section::new(DEFAULT_SECTION, 0);

        for (idx, raw_line) in self.source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();

            if line.starts_with('[') {
                let name = line
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| Malformed {
                        line: line_no,
                        reason: format!("unterminated section header: {line}"),
                    })?;
                let next = Section::new(name.trim(), line_no);
                sections.push(std::mem::replace(&mut current, next));
                continue;
            }

            if self.raw_sections.contains(&current.name.as_str()) {
                if !line.is_empty() {
                    current.body.push(raw_line.trim_end().to_string());
                }
                continue;
            }

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| Malformed {
                line: line_no,
                reason: format!("key-value delimiter not found: {line}"),
            })?;
            current
                .entries
                .push((key.trim().to_string(), value.trim().to_string()));
        }

        sections.push(current);
        Ok(sections)
    }
}
