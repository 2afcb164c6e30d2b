//! Position-resolved sequences built from UST files.
//!
//! A [`Sequence`] is what a renderer consumes: notes at absolute tick
//! positions, each carrying its volume envelope and pitch bend as
//! millisecond curves.

pub mod curve;
pub mod project;
pub mod tick;

pub use curve::{Curve, CurvePoint};
pub use project::project;
pub use tick::{ms_per_tick, Tick, RESOLUTION};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub voicebank_path: String,
    pub output_path: String,
    /// Ticks per quarter note.
    pub resolution: u32,
    /// Beats per minute.
    pub tempo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceNote {
    pub position: Tick,
    pub duration: Tick,
    pub lyric: String,
    pub note_num: u8,
    pub intensity: f64,
    pub pre_utterance: Option<f64>,
    pub voice_overlap: Option<f64>,
    pub start_point: Option<f64>,
    /// Normalized volume over time.
    pub envelope: Curve,
    /// Semitone offset over time.
    pub pitch: Curve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub metadata: Metadata,
    pub notes: Vec<SequenceNote>,
    /// Position after the last note, rests included.
    pub length: Tick,
}
