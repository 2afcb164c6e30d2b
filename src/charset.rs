//! Character-set sniffing and transcoding to UTF-8.
//!
//! UST files carry an optional `Charset=` line near the top. Files without one
//! are assumed to use the legacy encoding of the editor that wrote them
//! (Shift_JIS for classic UTAU).

use std::borrow::Cow;

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};

/// How many leading bytes are scanned for a `Charset=` declaration.
pub const DEFAULT_SNIFF_LEN: usize = 256;

const CHARSET_KEY: &str = "Charset=";

/// Scan the first `sniff_len` bytes for a `Charset=` line and return its label.
///
/// Only the prefix is inspected; a declaration further down is ignored.
pub fn sniff_label(bytes: &[u8], sniff_len: usize) -> Option<String> {
    let window = &bytes[..bytes.len().min(sniff_len)];
    let text = String::from_utf8_lossy(window);
    text.lines()
        .find(|line| line.contains(CHARSET_KEY))
        .and_then(|line| line.split_once('='))
        .map(|(_, label)| label.trim().to_string())
}

/// Resolve a WHATWG encoding label (`shift_jis`, `utf-8`, `cp932`, ...).
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Pick the decoder for `bytes`: the declared charset if present, else `fallback`.
///
/// A declared but empty `Charset=` means the text is already UTF-8. Returns the offending label when the declaration names no known encoding.
pub fn detect(
    bytes: &[u8],
    sniff_len: usize,
    fallback: &'static Encoding,
) -> Result<&'static Encoding, String> {
    match sniff_label(bytes, sniff_len) {
        Some(label) if label.is_empty() => Ok(UTF_8),
        Some(label) => encoding_for_label(&label).ok_or(label),
        None => Ok(fallback),
    }
}

/// Decode `bytes` to UTF-8 text, dropping a leading BOM.
///
/// UTF-8 input is passed through without transcoding. Malformed sequences are
/// replaced with U+FFFD.
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (text, _had_errors) = encoding.decode_with_bom_removal(bytes);
    text
}

/// Encode UTF-8 text into `encoding`, replacing unmappable characters.
pub fn encode<'a>(text: &'a str, encoding: &'static Encoding) -> Cow<'a, [u8]> {
    if encoding == UTF_8 {
        return Cow::Borrowed(text.as_bytes());
    }
    let (bytes, _, _had_errors) = encoding.encode(text);
    bytes
}

/// The encoding assumed for UST files that declare no charset.
pub fn legacy_default() -> &'static Encoding {
    SHIFT_JIS
}
