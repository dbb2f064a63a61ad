// Record schema for the two facets.
//
// The upstream loader exposes pieces as dataframes with hierarchical indices;
// at this boundary we pin that down to fixed-field records keyed by
// (corpus, piece, timespan). Both facets share the key structure, so the
// index in facet.rs is generic over the `PieceRecord` trait.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open time interval `[start, end)` in quarter-note units.
///
/// Two intervals overlap iff `a.start < b.end && b.start < a.end`, with one
/// exception: a degenerate interval (`start == end`) is empty and never
/// overlaps anything, in either argument position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timespan {
    pub start: f64,
    pub end: f64,
}

impl Timespan {
    pub fn new(start: f64, end: f64) -> Self {
        Timespan { start, end }
    }

    /// True if this interval contains no points (`start >= end`).
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Half-open overlap test. Empty intervals never overlap.
    pub fn overlaps(self, other: Timespan) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    pub fn duration(self) -> f64 {
        if self.is_empty() { 0.0 } else { self.end - self.start }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A record belonging to one piece of one corpus, placed in time.
///
/// Both facet row types implement this; the Facet index only needs the key.
pub trait PieceRecord {
    fn corpus(&self) -> &str;
    fn piece(&self) -> &str;
    fn span(&self) -> Timespan;
}

/// One row of the notes facet: a note (or salami slice) observation.
///
/// `tpc` is the tonal pitch class as a line-of-fifths coordinate (0 = C,
/// 1 = G, -1 = F, +7 = one sharp). `midi` is the absolute chromatic pitch
/// code (C4 = 60). The pair redundantly encodes a spelled pitch; decoding
/// and consistency checking live in the pitch crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub corpus: String,
    pub piece: String,
    pub span: Timespan,
    pub tpc: i32,
    pub midi: i32,
}

impl PieceRecord for Note {
    fn corpus(&self) -> &str {
        &self.corpus
    }

    fn piece(&self) -> &str {
        &self.piece
    }

    fn span(&self) -> Timespan {
        self.span
    }
}

/// One row of the expanded (harmonic labels) facet: a chord annotation.
///
/// `globalkey` is the piece's key as written in the annotation standard:
/// a letter with optional accidentals, lowercased to signal minor mode
/// (e.g. "f" is F minor, "Bb" is Bb major). The segmentation of label
/// timespans comes from the annotator and need not align to note boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledEvent {
    pub corpus: String,
    pub piece: String,
    pub span: Timespan,
    pub label: String,
    pub globalkey: String,
}

impl PieceRecord for LabeledEvent {
    fn corpus(&self) -> &str {
        &self.corpus
    }

    fn piece(&self) -> &str {
        &self.piece
    }

    fn span(&self) -> Timespan {
        self.span
    }
}
