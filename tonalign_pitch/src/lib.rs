// Tonalign pitch layer: spelled pitch arithmetic and key-relative annotation.
//
// The notes facet encodes each pitch twice: as a line-of-fifths coordinate
// (tpc) and as an absolute chromatic code (midi). This crate reconstructs
// spelled pitches from that pair, resolves each piece's global key from the
// harmonic labels, and rewrites every note's pitch as an interval class from
// the key's tonic. Expressing pitches relative to the tonic removes the
// variance that is due to the choice of key, which is what makes note
// distributions comparable across pieces.
//
// Everything works on the line of fifths, so enharmonic spelling survives:
// Ab and G# are different pitch classes here, as they are in the source
// annotations.
//
// - spelled.rs: SpelledPitchClass / SpelledPitch / SpelledIntervalClass
// - key.rs: key-name normalization, mode detection, per-piece key resolution
// - annotate.rs: pitch decoding and the per-piece annotation pass
// - error.rs: the crate's error type

pub mod annotate;
pub mod error;
pub mod key;
pub mod spelled;

pub use annotate::{AnnotatedNote, annotate, decode_pitch, relative_pitch};
pub use error::PitchError;
pub use key::{Key, Mode, normalize_key_name, parse_key, resolve_key};
pub use spelled::{SpelledIntervalClass, SpelledPitch, SpelledPitchClass};
