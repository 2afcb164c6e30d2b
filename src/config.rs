//! Configuration: optional `~/.utau-codec/config.yaml`.
//!
//! Every field is optional and falls back to the codec defaults. Encodings
//! are WHATWG labels such as `shift_jis`, `utf-8` or `gbk`.

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::charset;
use crate::ust::UstOptions;
use crate::voicebank::note_name::OctaveNumbering;
use crate::voicebank::{OtoOptions, PrefixMapOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown encoding in config: {0:?}")]
    UnknownEncoding(String),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct UstConfig {
    /// Encoding for files without a `Charset=` line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sniff_len: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct OtoConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_width: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_precision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PrefixMapConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<char>,
    #[serde(default)]
    pub sharps: bool,
    /// `c0` (C5 = 60) or `c-1` (C4 = 60).
    #[serde(default)]
    pub octaves: OctaveNumbering,
    /// Write the highest note first.
    #[serde(default)]
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ust: UstConfig,
    #[serde(default)]
    pub oto: OtoConfig,
    #[serde(default)]
    pub prefix_map: PrefixMapConfig,
}

fn encoding(
    label: Option<&str>,
    default: &'static Encoding,
) -> Result<&'static Encoding, ConfigError> {
    match label {
        None => Ok(default),
        Some(label) => charset::encoding_for_label(label)
            .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string())),
    }
}

fn descending(a: &u8, b: &u8) -> Ordering {
    b.cmp(a)
}

impl Config {
    pub fn ust_options(&self) -> Result<UstOptions, ConfigError> {
        let defaults = UstOptions::default();
        Ok(UstOptions {
            fallback_encoding: encoding(
                self.ust.fallback_encoding.as_deref(),
                defaults.fallback_encoding,
            )?,
            sniff_len: self.ust.sniff_len.unwrap_or(defaults.sniff_len),
        })
    }

    pub fn oto_options(&self) -> Result<OtoOptions, ConfigError> {
        let defaults = OtoOptions::default();
        Ok(OtoOptions {
            encoding: encoding(self.oto.encoding.as_deref(), defaults.encoding)?,
            comment: self.oto.comment.or(defaults.comment),
            float_width: self.oto.float_width.unwrap_or(defaults.float_width),
            float_precision: self.oto.float_precision.or(defaults.float_precision),
        })
    }

    pub fn prefix_map_options(&self) -> Result<PrefixMapOptions, ConfigError> {
        let defaults = PrefixMapOptions::default();
        let pm = &self.prefix_map;
        Ok(PrefixMapOptions {
            encoding: encoding(pm.encoding.as_deref(), defaults.encoding)?,
            delimiter: pm.delimiter.unwrap_or(defaults.delimiter),
            comment: pm.comment.or(defaults.comment),
            sharps: pm.sharps,
            octaves: pm.octaves,
            order: if pm.descending {
                descending
            } else {
                defaults.order
            },
        })
    }
}

/// `~/.utau-codec/config.yaml`, or a relative path when there is no home.
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".utau-codec");
    path.push("config.yaml");
    path
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Save a config, creating parent directories as needed.
pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}
