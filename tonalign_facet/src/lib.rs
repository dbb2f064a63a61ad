// Tonalign facet layer: tabular records and piece-level interval queries.
//
// A corpus loader hands us two tabular "facets" of each piece: a notes facet
// (one row per note or salami slice) and a harmonic-labels facet (one row per
// chord annotation). This crate gives those rows an explicit schema and an
// index so the rest of the pipeline can ask two questions cheaply:
//
// - "give me all rows of piece X in corpus Y" (exact key lookup)
// - "which of those rows overlap this time interval?" (half-open overlap)
//
// Rows are stored once in an arena (original order preserved) with a
// secondary index from (corpus, piece) to row positions, built on ingestion.
// Nothing here parses score files or knows about notation formats; rows
// arrive already tabular.
//
// - record.rs: Timespan, Note, LabeledEvent, and the PieceRecord trait
// - facet.rs: the Facet arena + index, lookups, and overlap queries

pub mod facet;
pub mod record;

pub use facet::{Facet, FacetError, overlapping_in};
pub use record::{LabeledEvent, Note, PieceRecord, Timespan};
