// Global keys and how to read them off the harmonic labels.
//
// The annotation standard writes the global key as a pitch-class name whose
// first letter is lowercased for minor keys: "f" is F minor, "Bb" is Bb
// major. The case only signals mode, never pitch, so normalization
// uppercases the first letter and leaves any accidental suffix alone.
//
// A piece's key is constant across all of its label rows; resolution takes
// the first row (by original row order) and does not verify that the rest
// agree. If the data ever carried per-row disagreement (modulation
// annotations in the globalkey column), it would go unnoticed here; callers
// needing that guarantee must validate separately.

use crate::error::PitchError;
use crate::spelled::SpelledPitchClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use tonalign_facet::{Facet, FacetError, LabeledEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Major,
    Minor,
}

/// A piece's global key: tonic pitch class plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    tonic: SpelledPitchClass,
    mode: Mode,
}

impl Key {
    pub fn new(tonic: SpelledPitchClass, mode: Mode) -> Self {
        Key { tonic, mode }
    }

    pub fn tonic(self) -> SpelledPitchClass {
        self.tonic
    }

    pub fn mode(self) -> Mode {
        self.mode
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            Mode::Major => "major",
            Mode::Minor => "minor",
        };
        write!(f, "{} {}", self.tonic.name(), mode)
    }
}

/// Normalize a raw key name to its tonic pitch class: uppercase only the
/// first letter ("f" -> F, "bb" -> Bb), leave the suffix untouched, parse.
///
/// Fails with `InvalidKeyName` if the first character is not a letter A-G
/// (case-insensitive) or the suffix is not a run of accidentals.
pub fn normalize_key_name(raw: &str) -> Result<SpelledPitchClass, PitchError> {
    let mut chars = raw.chars();
    let first = chars
        .next()
        .ok_or_else(|| PitchError::InvalidKeyName(raw.to_owned()))?;
    let normalized = format!("{}{}", first.to_ascii_uppercase(), chars.as_str());
    SpelledPitchClass::parse(&normalized).map_err(|_| PitchError::InvalidKeyName(raw.to_owned()))
}

/// Parse a raw key name into tonic and mode. A lowercase first letter
/// signals minor, uppercase major.
pub fn parse_key(raw: &str) -> Result<Key, PitchError> {
    let tonic = normalize_key_name(raw)?;
    let first = raw.chars().next().unwrap_or_default();
    let mode = if first.is_ascii_lowercase() {
        Mode::Minor
    } else {
        Mode::Major
    };
    Ok(Key::new(tonic, mode))
}

/// Resolve a piece's global key from its harmonic labels: the key field of
/// the first label row, in original row order. First-wins; later rows are
/// not checked for agreement.
///
/// Fails with `MissingKey` if the piece has no label rows at all.
pub fn resolve_key(
    labels: &Facet<LabeledEvent>,
    corpus: &str,
    piece: &str,
) -> Result<Key, PitchError> {
    let rows = labels.piece_rows(corpus, piece).map_err(|err| match err {
        FacetError::KeyNotFound { corpus, piece } => PitchError::MissingKey { corpus, piece },
    })?;
    match rows.first() {
        Some(row) => parse_key(&row.globalkey),
        None => Err(PitchError::MissingKey {
            corpus: corpus.to_owned(),
            piece: piece.to_owned(),
        }),
    }
}
