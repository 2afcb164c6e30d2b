//! `character.txt`: voicebank display metadata.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::charset;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharacterInfo {
    pub name: String,
    pub author: String,
    pub website: String,
    /// Icon path relative to the voicebank, with `/` separators.
    pub image: Option<String>,
    /// Voice sample path relative to the voicebank, with `/` separators.
    pub sample: Option<String>,
    /// Free-text lines that are not `key=value`, each newline-terminated.
    pub extra: String,
}

impl CharacterInfo {
    pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Self {
        Self::parse(&charset::decode(bytes, encoding))
    }

    /// Parse `character.txt` text. Never fails; unknown keys are dropped.
    pub fn parse(text: &str) -> Self {
        let mut info = Self::default();

        for line in text.lines() {
            match line.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    let value = value.trim();
                    match key.trim() {
                        "name" => info.name = value.to_string(),
                        "author" => info.author = value.to_string(),
                        "web" => info.website = value.to_string(),
                        "image" => info.image = Some(normalize_path(value)),
                        "sample" => info.sample = Some(normalize_path(value)),
                        _ => {}
                    }
                }
                _ => {
                    info.extra.push_str(line);
                    info.extra.push('\n');
                }
            }
        }

        info
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::SHIFT_JIS;

    #[test]
    fn known_keys() {
        let info = CharacterInfo::parse(
            "name=重音テト\nauthor = 小山乃舞世\nweb=https://kasaneteto.jp\n\
             image=icon\\teto.bmp\nsample=sample.wav\n",
        );
        assert_eq!(info.name, "重音テト");
        assert_eq!(info.author, "小山乃舞世");
        assert_eq!(info.website, "https://kasaneteto.jp");
        assert_eq!(info.image.as_deref(), Some("icon/teto.bmp"));
        assert_eq!(info.sample.as_deref(), Some("sample.wav"));
        assert!(info.extra.is_empty());
    }

    #[test]
    fn free_text_goes_to_extra() {
        let info = CharacterInfo::parse("name=a\nThanks for downloading!\n=odd\n\nversion=2\n");
        assert_eq!(info.extra, "Thanks for downloading!\n=odd\n\n");
        assert_eq!(info.name, "a");
    }

    #[test]
    fn missing_assets_stay_none() {
        let info = CharacterInfo::parse("name=a\n");
        assert!(info.image.is_none());
        assert!(info.sample.is_none());
    }

    #[test]
    fn decode_shift_jis() {
        let info = CharacterInfo::decode(b"name=\x82\xa0\n", SHIFT_JIS);
        assert_eq!(info.name, "あ");
    }
}
