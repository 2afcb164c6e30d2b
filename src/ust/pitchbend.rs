//! Mode2 pitch bend: a start point followed by a chain of segments.
//!
//! Each segment `i` spans `widths[i]` ticks and ends at `ys[i]` semitones,
//! travelling there with `modes[i]`. The text form is spread over the
//! `PBType`, `PBStart`/`PBS`, `PBW`, `PBY` and `PBM` keys of a note.

use serde::{Deserialize, Serialize};

use super::error::UstError;
use super::value::{parse_float, parse_float_list, Interpolation};
use crate::sequence::{Curve, CurvePoint};

/// Pitch bend type used when `PBType` is blank.
pub const DEFAULT_TYPE: i32 = 5;

/// Mode assumed for segments whose `PBM` entry is missing.
pub const DEFAULT_MODE: Interpolation = Interpolation::Sine;

/// Points sampled per segment by [`PitchBend::curve`], excluding the start.
pub const SAMPLES_PER_SEGMENT: usize = 10;

/// A 2D point: x in ticks (or ms once projected), y in semitones.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchBend {
    /// `PBType`; 5 unless the file says otherwise.
    pub pb_type: i32,
    /// Tick offset relative to the note start and initial semitone offset.
    pub start: Point,
    pub widths: Vec<f64>,
    pub ys: Vec<f64>,
    pub modes: Vec<Interpolation>,
}

impl Default for PitchBend {
    fn default() -> Self {
        Self {
            pb_type: DEFAULT_TYPE,
            start: Point::ORIGIN,
            widths: Vec::new(),
            ys: Vec::new(),
            modes: Vec::new(),
        }
    }
}

impl PitchBend {
    /// Parse the raw `PB*` values of a note.
    ///
    /// `start` (`PBStart`) takes precedence over `pbs` (`PBS`); both have the
    /// form `x[;y]`. Blank lists are empty, and blank mode tokens are skipped.
    ///
    /// `PBY` and `PBM` may hold more entries than `PBW`. The extras are kept
    /// as read, but [`curve`](Self::curve) and [`to_curve`](Self::to_curve)
    /// only use the first `widths.len()` of each.
    pub fn parse(
        pb_type: &str,
        start: &str,
        pbs: &str,
        widths: &str,
        ys: &str,
        modes: &str,
    ) -> Result<Self, UstError> {
        let pb_type = match pb_type.trim() {
            "" => DEFAULT_TYPE,
            raw => raw
                .parse()
                .map_err(|_| UstError::InvalidPitchBendType(raw.to_string()))?,
        };

        let start = if !start.trim().is_empty() {
            parse_start(start)?
        } else if !pbs.trim().is_empty() {
            parse_start(pbs)?
        } else {
            Point::ORIGIN
        };

        let modes = modes
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(Interpolation::from_code)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pb_type,
            start,
            widths: parse_float_list("PBW", widths)?,
            ys: parse_float_list("PBY", ys)?,
            modes,
        })
    }

    /// Whether this bend does nothing: no start offset and no segments.
    pub fn is_flat(&self) -> bool {
        self.start == Point::ORIGIN && self.widths.is_empty()
    }

    /// Copy with `ys` padded by 0.0 and `modes` padded by Sine up to the
    /// number of widths.
    pub fn padded(&self) -> Self {
        let n = self.widths.len();
        let mut pb = self.clone();
        if pb.ys.len() < n {
            pb.ys.resize(n, 0.0);
        }
        if pb.modes.len() < n {
            pb.modes.resize(n, DEFAULT_MODE);
        }
        pb
    }

    /// Sample the bend into a dense polyline in ticks/semitones.
    ///
    /// Every segment yields `SAMPLES_PER_SEGMENT + 1` points. Only segments
    /// that have both a width and a y are sampled; a missing mode is Linear.
    pub fn curve(&self) -> Vec<Point> {
        let segments = self.widths.len().min(self.ys.len());
        let mut points = Vec::with_capacity(segments * (SAMPLES_PER_SEGMENT + 1));
        let mut prev = self.start;

        for i in 0..segments {
            let width = self.widths[i];
            let end_y = self.ys[i];
            let mode = self.modes.get(i).copied().unwrap_or(Interpolation::Linear);

            for j in 0..=SAMPLES_PER_SEGMENT {
                let t = j as f64 / SAMPLES_PER_SEGMENT as f64;
                points.push(Point {
                    x: prev.x + width * t,
                    y: mode.interpolate(prev.y, end_y, t),
                });
            }

            prev = Point::new(prev.x + width, end_y);
        }

        points
    }

    /// Control-point curve in milliseconds for the sequencer.
    ///
    /// One point per segment start carrying that segment's mode, plus a
    /// terminal point where the last segment ends. A flat bend is empty.
    pub fn to_curve(&self, ms_per_tick: f64) -> Curve {
        if self.is_flat() {
            return Curve::default();
        }

        let pb = self.padded();
        let mut points = Vec::with_capacity(pb.widths.len() + 1);
        let mut x = pb.start.x;
        let mut y = pb.start.y;
        let mut mode = pb.modes.first().copied().unwrap_or(DEFAULT_MODE);

        for (i, width) in pb.widths.iter().enumerate() {
            mode = pb.modes[i];
            points.push(CurvePoint {
                x: x * ms_per_tick,
                y,
                interp: mode,
            });
            x += width;
            y = pb.ys[i];
        }

        points.push(CurvePoint {
            x: x * ms_per_tick,
            y,
            interp: mode,
        });

        Curve::from(points)
    }
}

fn parse_start(s: &str) -> Result<Point, UstError> {
    let (x, y) = match s.split_once(';') {
        Some((x, y)) => (x, Some(y)),
        None => (s, None),
    };
    let x = parse_float("PBStart", x)?;
    let y = match y {
        Some(y) if !y.trim().is_empty() => parse_float("PBStart", y)?,
        _ => 0.0,
    };
    Ok(Point { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn segment(start: Point, width: f64, y: f64, modes: Vec<Interpolation>) -> PitchBend {
        PitchBend {
            start,
            widths: vec![width],
            ys: vec![y],
            modes,
            ..PitchBend::default()
        }
    }

    #[test]
    fn parse_full() {
        let pb = PitchBend::parse("5", "-40;0", "", "65,69", "0,42", "l,s").unwrap();
        assert_eq!(pb.pb_type, 5);
        assert_eq!(pb.start, Point::new(-40.0, 0.0));
        assert_eq!(pb.widths, vec![65.0, 69.0]);
        assert_eq!(pb.ys, vec![0.0, 42.0]);
        assert_eq!(pb.modes, vec![Interpolation::Linear, Interpolation::Sine]);
    }

    #[test]
    fn start_wins_over_pbs() {
        let pb = PitchBend::parse("", "10;2", "-40;5", "30,40", "0.5,1.0", "l,s").unwrap();
        assert_eq!(pb.start, Point::new(10.0, 2.0));
    }

    #[test]
    fn pbs_used_when_start_blank() {
        let pb = PitchBend::parse("", "", "-40;5", "", "", "").unwrap();
        assert_eq!(pb.start, Point::new(-40.0, 5.0));
    }

    #[test]
    fn start_without_y_defaults_to_zero() {
        let pb = PitchBend::parse("", "", "-25", "", "", "").unwrap();
        assert_eq!(pb.start, Point::new(-25.0, 0.0));
    }

    #[test]
    fn blank_fields_use_defaults() {
        let pb = PitchBend::parse("", "", "0", "10", "0", "").unwrap();
        assert_eq!(pb.pb_type, DEFAULT_TYPE);
        assert_eq!(pb.start, Point::ORIGIN);
        assert_eq!(pb.widths, vec![10.0]);
        assert!(pb.modes.is_empty());
    }

    #[test]
    fn blank_mode_tokens_are_skipped() {
        let pb = PitchBend::parse("", "", "0", "1,2,3", "", ",r,,j,").unwrap();
        assert_eq!(pb.modes, vec![Interpolation::Rigid, Interpolation::Jump]);
        let pb = PitchBend::parse("", "", "0", "1", "", ",").unwrap();
        assert!(pb.modes.is_empty());
    }

    #[test]
    fn invalid_type() {
        assert!(matches!(
            PitchBend::parse("not-a-number", "", "", "", "", ""),
            Err(UstError::InvalidPitchBendType(_))
        ));
    }

    #[test]
    fn invalid_mode() {
        assert!(matches!(
            PitchBend::parse("", "", "0", "1", "0", "x"),
            Err(UstError::InvalidMode(_))
        ));
    }

    #[test]
    fn invalid_start() {
        assert!(matches!(
            PitchBend::parse("", "a;b", "", "", "", ""),
            Err(UstError::InvalidNumber {
                field: "PBStart",
                ..
            })
        ));
    }

    #[test]
    fn padded_fills_ys_and_sine_modes() {
        let pb = PitchBend {
            widths: vec![10.0, 20.0, 30.0],
            ys: vec![1.0],
            modes: vec![Interpolation::Linear],
            ..PitchBend::default()
        };
        let padded = pb.padded();
        assert_eq!(padded.ys, vec![1.0, 0.0, 0.0]);
        assert_eq!(
            padded.modes,
            vec![
                Interpolation::Linear,
                Interpolation::Sine,
                Interpolation::Sine
            ]
        );
        // original untouched
        assert_eq!(pb.ys.len(), 1);
    }

    #[test]
    fn curve_linear_segment() {
        let pb = segment(Point::ORIGIN, 10.0, 10.0, vec![Interpolation::Linear]);
        let curve = pb.curve();
        assert_eq!(curve.len(), 11);
        assert_eq!(curve[0], Point::new(0.0, 0.0));
        assert_approx_eq!(curve[10].x, 10.0);
        assert_approx_eq!(curve[10].y, 10.0);
        assert_approx_eq!(curve[5].y, 5.0);
    }

    #[test]
    fn curve_rigid_segment_holds_start_value() {
        let pb = segment(Point::new(5.0, 3.0), 10.0, 7.0, vec![Interpolation::Rigid]);
        let curve = pb.curve();
        assert_eq!(curve.len(), 11);
        assert!(curve.iter().all(|p| p.y == 3.0));
    }

    #[test]
    fn curve_jump_segment() {
        let pb = segment(Point::ORIGIN, 10.0, 5.0, vec![Interpolation::Jump]);
        let curve = pb.curve();
        assert_eq!(curve[0].y, 0.0);
        assert!(curve[1..].iter().all(|p| p.y == 5.0));
    }

    #[test]
    fn curve_sine_segment() {
        let pb = segment(Point::ORIGIN, 10.0, 10.0, vec![Interpolation::Sine]);
        let curve = pb.curve();
        assert!(curve[5].y > 4.0);
        assert!(curve[2].y < 2.0, "sine eases in, got {}", curve[2].y);
    }

    #[test]
    fn curve_missing_mode_is_linear() {
        let pb = segment(Point::ORIGIN, 10.0, 10.0, vec![]);
        let curve = pb.curve();
        assert_eq!(curve.len(), 11);
        assert_approx_eq!(curve[3].y, 3.0);
    }

    #[test]
    fn curve_segments_chain() {
        let pb = PitchBend {
            widths: vec![10.0, 10.0],
            ys: vec![2.0, 4.0],
            modes: vec![Interpolation::Linear, Interpolation::Linear],
            ..PitchBend::default()
        };
        let curve = pb.curve();
        assert_eq!(curve.len(), 22);
        assert_eq!(curve[11], Point::new(10.0, 2.0));
        assert_approx_eq!(curve[21].x, 20.0);
        assert_approx_eq!(curve[21].y, 4.0);
    }

    #[test]
    fn curve_ignores_widths_without_ys() {
        let pb = PitchBend {
            widths: vec![10.0, 10.0],
            ys: vec![2.0],
            ..PitchBend::default()
        };
        assert_eq!(pb.curve().len(), 11);
    }

    #[test]
    fn extra_ys_and_modes_are_kept_but_unused() {
        let pb = PitchBend::parse("", "0;1", "", "10", "2,7,9", "l,r,j").unwrap();
        assert_eq!(pb.ys, vec![2.0, 7.0, 9.0]);
        assert_eq!(pb.modes.len(), 3);
        assert_eq!(pb.padded(), pb);

        let dense = pb.curve();
        assert_eq!(dense.len(), 11);
        assert_approx_eq!(dense[10].x, 10.0);
        assert_approx_eq!(dense[10].y, 2.0);

        let curve = pb.to_curve(1.0);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].interp, Interpolation::Linear);
        assert_approx_eq!(curve[1].x, 10.0);
        assert_approx_eq!(curve[1].y, 2.0);
    }

    #[test]
    fn flat_bend_has_empty_curve() {
        let pb = PitchBend::default();
        assert!(pb.is_flat());
        assert!(pb.to_curve(1.0).is_empty());
    }

    #[test]
    fn origin_start_with_widths_is_not_flat() {
        let pb = segment(Point::ORIGIN, 10.0, 2.0, vec![]);
        assert!(!pb.is_flat());
        assert_eq!(pb.to_curve(1.0).len(), 2);
    }

    #[test]
    fn to_curve_scales_ticks_to_ms() {
        let pb = PitchBend::parse("5", "-40;0", "", "65,69", "0,42", "l").unwrap();
        let curve = pb.to_curve(0.5);
        assert_eq!(curve.len(), 3);
        assert_approx_eq!(curve[0].x, -20.0);
        assert_eq!(curve[0].interp, Interpolation::Linear);
        assert_approx_eq!(curve[1].x, 12.5);
        assert_approx_eq!(curve[1].y, 0.0);
        assert_eq!(curve[1].interp, Interpolation::Sine);
        assert_approx_eq!(curve[2].x, 47.0);
        assert_approx_eq!(curve[2].y, 42.0);
    }
}
