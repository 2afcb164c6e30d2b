//! Volume envelope of a UST note.
//!
//! The text form is `p1,p2,p3,v1,v2,v3,v4[,p4[,p5]]`: times in milliseconds,
//! volumes in percent. Any slot may be `%` (auto).

use serde::{Deserialize, Serialize};

use super::error::UstError;
use super::value::{EnvelopeValue, Interpolation};
use crate::sequence::{Curve, CurvePoint};

const MIN_VALUES: usize = 7;
const MAX_VALUES: usize = 9;

/// A fixed-shape volume envelope.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub p1: EnvelopeValue,
    pub p2: EnvelopeValue,
    pub p3: EnvelopeValue,
    pub v1: EnvelopeValue,
    pub v2: EnvelopeValue,
    pub v3: EnvelopeValue,
    pub v4: EnvelopeValue,
    /// Release point. Auto means "end of note".
    pub p4: EnvelopeValue,
    /// Secondary point between p2 and p3.
    pub p5: EnvelopeValue,
    /// Volume at p5. Not present in the text form; auto unless set directly.
    pub v5: EnvelopeValue,
}

impl Envelope {
    /// Shorthand for an envelope with every text slot set to a literal.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p1: f64,
        p2: f64,
        p3: f64,
        v1: f64,
        v2: f64,
        v3: f64,
        v4: f64,
        p4: f64,
        p5: f64,
    ) -> Self {
        Self {
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
            v1: v1.into(),
            v2: v2.into(),
            v3: v3.into(),
            v4: v4.into(),
            p4: p4.into(),
            p5: p5.into(),
            v5: EnvelopeValue::Auto,
        }
    }

    /// Parse the comma-separated envelope text of a note.
    pub fn parse(s: &str) -> Result<Self, UstError> {
        let tokens: Vec<&str> = s.split(',').collect();
        if tokens.len() < MIN_VALUES {
            return Err(UstError::TooFewEnvelopeValues(tokens.len()));
        }
        if tokens.len() > MAX_VALUES {
            return Err(UstError::TooManyEnvelopeValues(tokens.len()));
        }

        let values = tokens
            .iter()
            .map(|t| EnvelopeValue::parse(t))
            .collect::<Result<Vec<_>, _>>()?;
        let slot = |i: usize| values.get(i).copied().unwrap_or_default();

        Ok(Self {
            p1: slot(0),
            p2: slot(1),
            p3: slot(2),
            v1: slot(3),
            v2: slot(4),
            v3: slot(5),
            v4: slot(6),
            p4: slot(7),
            p5: slot(8),
            v5: EnvelopeValue::Auto,
        })
    }

    /// Turn the envelope into a volume curve for a note lasting `note_ms`.
    ///
    /// Volumes are normalized to `[0, 1]`; auto volumes are 0 and an auto p4
    /// sits at the end of the note. A fifth point is added only when p5 or v5
    /// holds a literal.
    pub fn to_curve(&self, note_ms: f64) -> Curve {
        let mut points = Vec::with_capacity(5);
        let mut add = |ms: f64, volume: EnvelopeValue| {
            points.push(CurvePoint {
                x: ms,
                y: volume.resolve(0.0) / 100.0,
                interp: Interpolation::Linear,
            });
        };

        add(self.p1.resolve(0.0), self.v1);
        add(self.p2.resolve(0.0), self.v2);
        add(self.p3.resolve(0.0), self.v3);
        add(self.p4.resolve(note_ms), self.v4);

        if !self.p5.is_auto() || !self.v5.is_auto() {
            add(self.p5.resolve(note_ms), self.v5);
        }

        Curve::from(points)
    }
}
