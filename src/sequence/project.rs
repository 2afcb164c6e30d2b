//! UST → Sequence projection.
//!
//! Walks the notes of a [`File`] in order, keeping a running tick position.
//! Rests advance the position but emit nothing.

use tracing::trace;

use super::tick::{ms_per_tick, Tick, RESOLUTION};
use super::{Metadata, Sequence, SequenceNote};
use crate::ust::{File, Note};

/// Project a decoded file onto an absolute timeline.
pub fn project(file: &File) -> Sequence {
    let tempo = file.settings.tempo;
    let mut position = Tick::ZERO;
    let mut notes = Vec::with_capacity(file.notes.len());

    for note in &file.notes {
        let duration = Tick::from(note.length);
        if note.is_rest() {
            trace!(position = position.ticks(), length = note.length, "rest");
        } else {
            notes.push(project_note(note, position, tempo));
        }
        position = position + duration;
    }

    Sequence {
        metadata: Metadata {
            name: file.settings.project_name.clone(),
            voicebank_path: file.settings.voice_dir.clone(),
            output_path: file.settings.out_file.clone(),
            resolution: RESOLUTION,
            tempo,
        },
        notes,
        length: position,
    }
}

fn project_note(note: &Note, position: Tick, tempo: f64) -> SequenceNote {
    let duration = Tick::from(note.length);
    let duration_ms = duration.to_ms(tempo);

    let envelope = note
        .envelope
        .as_ref()
        .map(|env| env.to_curve(duration_ms))
        .unwrap_or_default();
    let pitch = note
        .pitch_bend
        .as_ref()
        .map(|pb| pb.to_curve(ms_per_tick(tempo)))
        .unwrap_or_default();

    SequenceNote {
        position,
        duration,
        lyric: note.lyric.clone(),
        note_num: note.note_num,
        intensity: note.intensity,
        pre_utterance: note.pre_utterance,
        voice_overlap: note.voice_overlap,
        start_point: note.start_point,
        envelope,
        pitch,
    }
}
