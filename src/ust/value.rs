//! Scalar field codecs: optional floats, float lists, "auto" envelope values
//! and single-character interpolation codes.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::UstError;

/// Parse a mandatory decimal float.
pub fn parse_float(field: &'static str, s: &str) -> Result<f64, UstError> {
    s.trim().parse().map_err(|_| UstError::InvalidNumber {
        field,
        raw: s.to_string(),
    })
}

/// Parse a float that may be left blank. Blank means absent, not zero.
pub fn parse_optional_float(field: &'static str, s: &str) -> Result<Option<f64>, UstError> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    parse_float(field, s).map(Some)
}

/// Parse a comma-separated float list. Blank input is an empty list.
///
/// A single malformed token fails the whole list and reports its index.
pub fn parse_float_list(field: &'static str, s: &str) -> Result<Vec<f64>, UstError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .enumerate()
        .map(|(index, token)| {
            token
                .trim()
                .parse()
                .map_err(|_| UstError::InvalidFloatList {
                    field,
                    index,
                    raw: token.to_string(),
                })
        })
        .collect()
}

/// Parse an INI-style boolean (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, ...).
pub fn parse_bool(field: &'static str, s: &str) -> Result<bool, UstError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" | "on" => Ok(true),
        "0" | "f" | "false" | "n" | "no" | "off" => Ok(false),
        _ => Err(UstError::InvalidBool {
            field,
            raw: s.to_string(),
        }),
    }
}

/// One slot of an envelope: a literal number or the `%` "auto" marker.
///
/// Auto is resolved only when the envelope is turned into a curve, because
/// its meaning depends on the note it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum EnvelopeValue {
    Value(f64),
    #[default]
    Auto,
}

impl EnvelopeValue {
    /// Parse one envelope token. `""` and `"%"` are auto.
    pub fn parse(s: &str) -> Result<Self, UstError> {
        let s = s.trim();
        if s.is_empty() || s == "%" {
            return Ok(Self::Auto);
        }
        parse_float("Envelope", s).map(Self::Value)
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The literal value, or `auto` when this slot is automatic.
    pub fn resolve(self, auto: f64) -> f64 {
        match self {
            Self::Value(v) => v,
            Self::Auto => auto,
        }
    }
}

impl From<f64> for EnvelopeValue {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl fmt::Display for EnvelopeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Auto => write!(f, "%"),
        }
    }
}

/// How a curve travels from one point to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolation {
    Linear,
    Sine,
    Rigid,
    Jump,
}

impl Interpolation {
    /// Parse a UST mode code (`l`, `s`, `r`, `j`).
    pub fn from_code(token: &str) -> Result<Self, UstError> {
        match token {
            "l" => Ok(Self::Linear),
            "s" => Ok(Self::Sine),
            "r" => Ok(Self::Rigid),
            "j" => Ok(Self::Jump),
            other => Err(UstError::InvalidMode(other.to_string())),
        }
    }

    /// The UST mode code for this interpolation.
    pub fn code(self) -> &'static str {
        match self {
            Self::Linear => "l",
            Self::Sine => "s",
            Self::Rigid => "r",
            Self::Jump => "j",
        }
    }

    /// Value between `from` and `to` at normalized position `t` in `[0, 1]`.
    ///
    /// Jump holds `from` only at exactly `t == 0`; Rigid holds it throughout.
    pub fn interpolate(self, from: f64, to: f64, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => from * (1.0 - t) + to * t,
            Self::Sine => from + (to - from) * (0.5 - 0.5 * (PI * t).cos()),
            Self::Rigid => from,
            Self::Jump => {
                if t <= 0.0 {
                    from
                } else {
                    to
                }
            }
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
