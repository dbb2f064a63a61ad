// The Facet: an arena of rows plus a (corpus, piece) index.
//
// Rows are stored once, in ingestion order, and never reordered. The index
// maps corpus -> piece -> row positions so piece lookups avoid rescanning
// the whole table. Pieces are also remembered in first-appearance order,
// which downstream per-piece passes rely on for deterministic output.
//
// Overlap queries are a linear scan over the piece's rows. Pieces are small
// (hundreds to low thousands of rows) and the scan preserves row order for
// free; a start-sorted sweep would only pay off for much larger pieces.

use crate::record::{PieceRecord, Timespan};
use rustc_hash::FxHashMap;
use std::fmt;

/// Errors from facet queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetError {
    /// The requested (corpus, piece) pair has no rows in this facet.
    KeyNotFound { corpus: String, piece: String },
}

impl fmt::Display for FacetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetError::KeyNotFound { corpus, piece } => {
                write!(f, "no rows for piece ({corpus}, {piece})")
            }
        }
    }
}

impl std::error::Error for FacetError {}

/// One tabular facet of a corpus: all rows of one representation
/// (notes, salami slices, harmonic labels) across all pieces.
#[derive(Debug, Clone)]
pub struct Facet<R> {
    rows: Vec<R>,
    /// corpus -> piece -> positions into `rows`, each in ingestion order.
    index: FxHashMap<String, FxHashMap<String, Vec<usize>>>,
    /// (corpus, piece) pairs in first-appearance order.
    piece_order: Vec<(String, String)>,
}

impl<R: PieceRecord> Facet<R> {
    /// Ingest rows and build the piece index. Row order is preserved.
    pub fn new(rows: Vec<R>) -> Self {
        let mut index: FxHashMap<String, FxHashMap<String, Vec<usize>>> = FxHashMap::default();
        let mut piece_order = Vec::new();
        for (pos, row) in rows.iter().enumerate() {
            let by_piece = index.entry(row.corpus().to_owned()).or_default();
            let positions = by_piece.entry(row.piece().to_owned()).or_insert_with(|| {
                piece_order.push((row.corpus().to_owned(), row.piece().to_owned()));
                Vec::new()
            });
            positions.push(pos);
        }
        Facet {
            rows,
            index,
            piece_order,
        }
    }

    /// All rows, in ingestion order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct (corpus, piece) pairs in first-appearance order.
    pub fn pieces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.piece_order
            .iter()
            .map(|(corpus, piece)| (corpus.as_str(), piece.as_str()))
    }

    fn positions(&self, corpus: &str, piece: &str) -> Result<&[usize], FacetError> {
        self.index
            .get(corpus)
            .and_then(|by_piece| by_piece.get(piece))
            .map(Vec::as_slice)
            .ok_or_else(|| FacetError::KeyNotFound {
                corpus: corpus.to_owned(),
                piece: piece.to_owned(),
            })
    }

    /// All rows of one piece, in ingestion order.
    ///
    /// Fails with `KeyNotFound` if the pair has no rows at all.
    pub fn piece_rows(&self, corpus: &str, piece: &str) -> Result<Vec<&R>, FacetError> {
        let positions = self.positions(corpus, piece)?;
        Ok(positions.iter().map(|&p| &self.rows[p]).collect())
    }

    /// Point lookup: the piece's rows whose span equals `span` exactly.
    ///
    /// An unknown piece is `KeyNotFound`; a known piece with no row at that
    /// exact span is an empty result, not an error.
    pub fn rows_at(&self, corpus: &str, piece: &str, span: Timespan) -> Result<Vec<&R>, FacetError> {
        let positions = self.positions(corpus, piece)?;
        Ok(positions
            .iter()
            .map(|&p| &self.rows[p])
            .filter(|row| row.span() == span)
            .collect())
    }

    /// The piece's rows whose span overlaps `query` (half-open semantics),
    /// in ingestion order. Rows of other pieces are never considered, even
    /// when their coordinates coincide.
    pub fn overlapping(
        &self,
        corpus: &str,
        piece: &str,
        query: Timespan,
    ) -> Result<Vec<&R>, FacetError> {
        let positions = self.positions(corpus, piece)?;
        Ok(positions
            .iter()
            .map(|&p| &self.rows[p])
            .filter(|row| row.span().overlaps(query))
            .collect())
    }
}

/// Overlap filter over rows already scoped to one piece. Input order is
/// preserved, so repeated calls on the same rows give identical output.
/// An empty input yields an empty result, not an error.
pub fn overlapping_in<'a, R, I>(rows: I, query: Timespan) -> Vec<&'a R>
where
    R: PieceRecord,
    I: IntoIterator<Item = &'a R>,
{
    rows.into_iter()
        .filter(|row| row.span().overlaps(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Note;

    fn note(piece: &str, start: f64, end: f64) -> Note {
        Note {
            corpus: "ABC".into(),
            piece: piece.into(),
            span: Timespan::new(start, end),
            tpc: 0,
            midi: 60,
        }
    }

    fn sample_facet() -> Facet<Note> {
        Facet::new(vec![
            note("n01", 10.0, 11.0),
            note("n01", 11.0, 12.0),
            note("n01", 12.0, 13.0),
            note("n02", 11.0, 12.0), // same coordinates, different piece
        ])
    }

    #[test]
    fn test_piece_rows_in_order() {
        let facet = sample_facet();
        let rows = facet.piece_rows("ABC", "n01").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].span, Timespan::new(10.0, 11.0));
        assert_eq!(rows[2].span, Timespan::new(12.0, 13.0));
    }

    #[test]
    fn test_unknown_piece_is_key_not_found() {
        let facet = sample_facet();
        let err = facet.piece_rows("ABC", "n99").unwrap_err();
        assert_eq!(
            err,
            FacetError::KeyNotFound {
                corpus: "ABC".into(),
                piece: "n99".into(),
            }
        );
        // Unknown corpus too, even if the piece name exists elsewhere.
        assert!(facet.piece_rows("XYZ", "n01").is_err());
    }

    #[test]
    fn test_rows_at_exact_span() {
        let facet = sample_facet();
        let rows = facet
            .rows_at("ABC", "n01", Timespan::new(11.0, 12.0))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].piece, "n01");

        // Known piece, no exact match: empty, not an error.
        let rows = facet
            .rows_at("ABC", "n01", Timespan::new(11.0, 12.5))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_overlapping_label_scenario() {
        // Slices [10,11) [11,12) [12,13) against a chord label at [11.5,12.5):
        // exactly the last two slices overlap.
        let facet = sample_facet();
        let hits = facet
            .overlapping("ABC", "n01", Timespan::new(11.5, 12.5))
            .unwrap();
        let spans: Vec<_> = hits.iter().map(|n| n.span).collect();
        assert_eq!(
            spans,
            vec![Timespan::new(11.0, 12.0), Timespan::new(12.0, 13.0)]
        );
    }

    #[test]
    fn test_overlapping_excludes_other_pieces() {
        let facet = sample_facet();
        let hits = facet
            .overlapping("ABC", "n02", Timespan::new(10.0, 13.0))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].piece, "n02");
    }

    #[test]
    fn test_overlapping_in_free_function() {
        let rows = vec![
            note("n01", 0.0, 1.0),
            note("n01", 1.0, 2.0),
            note("n01", 5.0, 5.0), // degenerate slice
        ];
        let hits = overlapping_in(&rows, Timespan::new(0.5, 10.0));
        assert_eq!(hits.len(), 2);

        // Empty input: empty output.
        let empty: Vec<Note> = Vec::new();
        assert!(overlapping_in(&empty, Timespan::new(0.0, 1.0)).is_empty());
    }

    #[test]
    fn test_overlapping_stable_across_calls() {
        let facet = sample_facet();
        let query = Timespan::new(10.5, 12.5);
        let a: Vec<_> = facet
            .overlapping("ABC", "n01", query)
            .unwrap()
            .iter()
            .map(|n| n.span)
            .collect();
        let b: Vec<_> = facet
            .overlapping("ABC", "n01", query)
            .unwrap()
            .iter()
            .map(|n| n.span)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pieces_first_appearance_order() {
        let facet = Facet::new(vec![
            note("n02", 0.0, 1.0),
            note("n01", 0.0, 1.0),
            note("n02", 1.0, 2.0),
        ]);
        let pieces: Vec<_> = facet.pieces().collect();
        assert_eq!(pieces, vec![("ABC", "n02"), ("ABC", "n01")]);
    }
}
