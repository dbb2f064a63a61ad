// Pitch decoding and the key-relative annotation pass.
//
// decode_pitch reconstructs a spelled pitch from the redundant (tpc, midi)
// pair carried by every note row. The fifths coordinate implies an
// alteration; subtracting it from midi leaves the bare letter's chromatic
// value, from which the spelled octave follows. When the two encodings
// disagree about the letter, the row is malformed and decoding fails.
//
// annotate runs that decoding over a whole notes facet, resolves each
// piece's key once from the labels facet, and appends the key-relative
// fields next to the originals. Keys are resolved sequentially in piece
// order; the per-row work after that is independent, so it runs on rayon
// with an order-preserving collect.

use crate::error::PitchError;
use crate::key::{Key, resolve_key};
use crate::spelled::{SpelledIntervalClass, SpelledPitch, SpelledPitchClass};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tonalign_facet::{Facet, LabeledEvent, Note};

/// Reconstruct a spelled pitch from a fifths coordinate and an absolute
/// chromatic code.
///
/// The alteration implied by `tpc` is subtracted from `midi` to obtain the
/// bare letter's chromatic value; the spelled octave is that value
/// div 12, minus 1. Exact integer arithmetic throughout; if the chromatic
/// residue does not match the letter the pair encodes no spelled pitch and
/// decoding fails with `InconsistentPitchEncoding`.
pub fn decode_pitch(tpc: i32, midi: i32) -> Result<SpelledPitch, PitchError> {
    let class = SpelledPitchClass::new(tpc);
    let letter_midi = midi - class.alteration();
    let octave = letter_midi.div_euclid(12) - 1;
    let decoded = SpelledPitch::new(class, octave);
    if decoded.midi() != midi {
        return Err(PitchError::InconsistentPitchEncoding { tpc, midi });
    }
    Ok(decoded)
}

/// Express a pitch relative to a key: project to pitch class, subtract the
/// tonic. Octaves are dropped on purpose: transposition-invariant
/// comparison is only meaningful at the pitch-class level, and keeping the
/// octave would conflate register with harmonic function.
pub fn relative_pitch(pitch: SpelledPitch, key: Key) -> SpelledIntervalClass {
    pitch.class() - key.tonic()
}

/// A note row plus the derived pitch columns. The original row is kept
/// intact alongside the additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedNote {
    pub note: Note,
    /// Spelled pitch name with octave, e.g. "Ab4".
    pub pitch_name: String,
    /// Spelled octave of the pitch.
    pub octave: i32,
    /// Name of the key's tonic, e.g. "F".
    pub global_root: String,
    /// Fifths coordinate of the key's tonic.
    pub global_root_tpc: i32,
    /// Scale-degree name of the pitch relative to the tonic, e.g. "b3".
    pub relative_pitch_name: String,
    /// Fifths coordinate of the relative interval class.
    pub relative_pitch_fifths: i32,
}

fn annotate_row(note: &Note, key: Key) -> Result<AnnotatedNote, PitchError> {
    let pitch = decode_pitch(note.tpc, note.midi)?;
    let relative = relative_pitch(pitch, key);
    Ok(AnnotatedNote {
        note: note.clone(),
        pitch_name: pitch.name(),
        octave: pitch.octave(),
        global_root: key.tonic().name(),
        global_root_tpc: key.tonic().fifths(),
        relative_pitch_name: relative.name(),
        relative_pitch_fifths: relative.fifths(),
    })
}

/// Annotate every note with its spelled pitch and its pitch relative to the
/// piece's global key.
///
/// Keys are resolved once per (corpus, piece) group from the labels facet;
/// rows keep their original order exactly, and groups share no state. Fails
/// on the first piece without labels (`MissingKey`) or the first malformed
/// pitch encoding; whether to skip such pieces instead is the caller's
/// policy, not this function's.
pub fn annotate(
    notes: &Facet<Note>,
    labels: &Facet<LabeledEvent>,
) -> Result<Vec<AnnotatedNote>, PitchError> {
    let mut keys: FxHashMap<(&str, &str), Key> = FxHashMap::default();
    for (corpus, piece) in notes.pieces() {
        let key = resolve_key(labels, corpus, piece)?;
        keys.insert((corpus, piece), key);
    }
    notes
        .rows()
        .par_iter()
        .map(|note| {
            let key = keys
                .get(&(note.corpus.as_str(), note.piece.as_str()))
                .copied()
                .ok_or_else(|| PitchError::MissingKey {
                    corpus: note.corpus.clone(),
                    piece: note.piece.clone(),
                })?;
            annotate_row(note, key)
        })
        .collect()
}
