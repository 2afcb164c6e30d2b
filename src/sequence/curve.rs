//! Time-domain curves: ordered `(ms, value, interpolation)` breakpoints.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::ust::Interpolation;

/// One breakpoint. `interp` shapes the way toward the next point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Milliseconds relative to the note start.
    pub x: f64,
    pub y: f64,
    pub interp: Interpolation,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64, interp: Interpolation) -> Self {
        Self { x, y, interp }
    }
}

/// An ordered list of breakpoints. Empty means "no curve".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve(Vec<CurvePoint>);

impl Curve {
    pub fn points(&self) -> &[CurvePoint] {
        &self.0
    }

    pub fn into_points(self) -> Vec<CurvePoint> {
        self.0
    }

    /// Evaluate the curve at `ms`.
    ///
    /// Holds the first value before the first point and the last value after
    /// the last one. Between two points the earlier point's interpolation is
    /// used. Returns `None` for an empty curve.
    pub fn value_at(&self, ms: f64) -> Option<f64> {
        let first = self.0.first()?;
        if ms <= first.x {
            return Some(first.y);
        }

        for pair in self.0.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if ms >= from.x && ms <= to.x {
                let span = to.x - from.x;
                if span <= 0.0 {
                    return Some(to.y);
                }
                let t = (ms - from.x) / span;
                return Some(from.interp.interpolate(from.y, to.y, t));
            }
        }

        self.0.last().map(|p| p.y)
    }
}

impl From<Vec<CurvePoint>> for Curve {
    fn from(points: Vec<CurvePoint>) -> Self {
        Self(points)
    }
}

impl FromIterator<CurvePoint> for Curve {
    fn from_iter<I: IntoIterator<Item = CurvePoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for Curve {
    type Target = [CurvePoint];

    fn deref(&self) -> &[CurvePoint] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = &'a CurvePoint;
    type IntoIter = std::slice::Iter<'a, CurvePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
