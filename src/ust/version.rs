//! UST format version (`[#VERSION]` block).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::UstError;

const VERSION_TOKEN: &str = "UST Version";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Version {
    #[default]
    V1_2,
    V2_0,
}

impl Version {
    /// Parse the exact version line, e.g. `UST Version1.2`.
    pub fn parse(s: &str) -> Result<Self, UstError> {
        match s.trim() {
            "UST Version1.2" => Ok(Self::V1_2),
            "UST Version2.0" => Ok(Self::V2_0),
            other => Err(UstError::InvalidVersion(other.to_string())),
        }
    }

    /// Find the version line among the body lines of a `#VERSION` block.
    ///
    /// A block without one is version 1.2. When several lines mention a
    /// version, the last one wins.
    pub fn from_body<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Self, UstError> {
        let mut version = Self::default();
        for line in lines {
            if line.contains(VERSION_TOKEN) {
                version = Self::parse(line)?;
            }
        }
        Ok(version)
    }

    /// The version line as written in a UST file.
    pub fn raw_string(self) -> String {
        format!("{VERSION_TOKEN}{self}")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1_2 => write!(f, "1.2"),
            Self::V2_0 => write!(f, "2.0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_versions() {
        assert_eq!(Version::parse("UST Version1.2").unwrap(), Version::V1_2);
        assert_eq!(Version::parse("UST Version2.0").unwrap(), Version::V2_0);
        assert_eq!(Version::parse("  UST Version2.0 ").unwrap(), Version::V2_0);
    }

    #[test]
    fn parse_unknown_version() {
        let err = Version::parse("UST Version3.9").unwrap_err();
        assert!(matches!(err, UstError::InvalidVersion(ref s) if s == "UST Version3.9"));
    }

    #[test]
    fn body_without_version_line_defaults() {
        assert_eq!(Version::from_body(["Charset=UTF-8"]).unwrap(), Version::V1_2);
        assert_eq!(Version::from_body(std::iter::empty()).unwrap(), Version::V1_2);
    }

    #[test]
    fn body_scans_for_version_line() {
        let v = Version::from_body(["Charset=UTF-8", "UST Version2.0"]).unwrap();
        assert_eq!(v, Version::V2_0);
    }

    #[test]
    fn display_and_raw_string() {
        assert_eq!(Version::V1_2.to_string(), "1.2");
        assert_eq!(Version::V2_0.raw_string(), "UST Version2.0");
    }
}
