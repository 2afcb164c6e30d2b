//! Sequence time in integer ticks.
//!
//! Positions are summed as integers so long files never drift; milliseconds
//! are only derived at the edges, from the tempo and [`RESOLUTION`].

use std::cmp::Ordering;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Ticks per quarter note. Fixed for UST; never read from the file.
pub const RESOLUTION: u32 = 480;

/// Milliseconds covered by one tick at `tempo` beats per minute.
pub fn ms_per_tick(tempo: f64) -> f64 {
    60_000.0 / (tempo * RESOLUTION as f64)
}

/// A tick position or duration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tick {
    ticks: u64,
}

impl Tick {
    pub const ZERO: Tick = Tick { ticks: 0 };

    pub fn from_ticks(ticks: u64) -> Self {
        Self { ticks }
    }

    pub fn ticks(self) -> u64 {
        self.ticks
    }

    /// Convert to milliseconds at `tempo` BPM.
    pub fn to_ms(self, tempo: f64) -> f64 {
        self.ticks as f64 * ms_per_tick(tempo)
    }
}

impl From<u32> for Tick {
    fn from(ticks: u32) -> Self {
        Self::from_ticks(ticks as u64)
    }
}

impl Ord for Tick {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

impl PartialOrd for Tick {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Tick {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks + rhs.ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn ms_per_tick_at_120_bpm() {
        // 500 ms per beat / 480 ticks
        assert_approx_eq!(ms_per_tick(120.0), 500.0 / 480.0);
    }

    #[test]
    fn to_ms() {
        assert_approx_eq!(Tick::from_ticks(960).to_ms(120.0), 1000.0);
        assert_approx_eq!(Tick::from_ticks(480).to_ms(60.0), 1000.0);
    }

    #[test]
    fn arithmetic() {
        let a = Tick::from_ticks(480);
        let b = Tick::from_ticks(240);
        assert_eq!((a + b).ticks(), 720);
        assert!(b < a);
    }

    #[test]
    fn from_u32() {
        assert_eq!(Tick::from(u32::MAX).ticks(), u32::MAX as u64);
    }
}
