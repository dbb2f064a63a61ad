// Error type for key resolution and pitch decoding.
//
// Raised at the point of detection and propagated uncaught; this layer has
// no recovery policy. Callers decide per piece whether to skip or abort.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PitchError {
    /// The piece has no harmonic-label rows, so no global key can be read.
    MissingKey { corpus: String, piece: String },
    /// A key name whose first character is not a letter A-G, or whose
    /// accidental suffix is not a run of '#' or 'b'.
    InvalidKeyName(String),
    /// The (tpc, midi) pair of a note does not describe any spelled pitch:
    /// the letter implied by the fifths coordinate disagrees with the
    /// chromatic value.
    InconsistentPitchEncoding { tpc: i32, midi: i32 },
}

impl fmt::Display for PitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchError::MissingKey { corpus, piece } => {
                write!(f, "no harmonic labels for piece ({corpus}, {piece}), cannot resolve key")
            }
            PitchError::InvalidKeyName(raw) => {
                write!(f, "unparseable key name {raw:?}")
            }
            PitchError::InconsistentPitchEncoding { tpc, midi } => {
                write!(f, "tpc {tpc} and midi {midi} do not encode a spelled pitch")
            }
        }
    }
}

impl std::error::Error for PitchError {}
