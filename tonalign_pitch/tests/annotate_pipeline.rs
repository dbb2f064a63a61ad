// Integration test for the full facet pipeline.
//
// Builds a two-piece corpus in memory (notes facet + harmonic labels facet),
// matches slices against a chord label's timespan, and runs the key-relative
// annotation pass end to end. No files, no loader: the facets are exactly
// what a corpus loader would hand over.

use tonalign_facet::{Facet, LabeledEvent, Note, Timespan};
use tonalign_pitch::{PitchError, annotate, resolve_key};

fn note(piece: &str, start: f64, end: f64, tpc: i32, midi: i32) -> Note {
    Note {
        corpus: "ABC".into(),
        piece: piece.into(),
        span: Timespan::new(start, end),
        tpc,
        midi,
    }
}

fn label(piece: &str, start: f64, end: f64, chord: &str, globalkey: &str) -> LabeledEvent {
    LabeledEvent {
        corpus: "ABC".into(),
        piece: piece.into(),
        span: Timespan::new(start, end),
        label: chord.into(),
        globalkey: globalkey.into(),
    }
}

/// Two pieces: one in F minor, one in Bb major. Notes interleave pitches
/// that spell differently in the two keys.
fn sample_corpus() -> (Facet<Note>, Facet<LabeledEvent>) {
    let notes = Facet::new(vec![
        // Piece 1, F minor: F4, Ab4, C5.
        note("n01", 0.0, 1.0, -1, 65),
        note("n01", 1.0, 2.0, -4, 68),
        note("n01", 2.0, 3.0, 0, 72),
        // Piece 2, Bb major: Bb3, D4, F4.
        note("n02", 0.0, 1.0, -2, 58),
        note("n02", 1.0, 2.0, 2, 62),
        note("n02", 2.0, 3.0, -1, 65),
    ]);
    let labels = Facet::new(vec![
        label("n01", 0.0, 2.0, "i", "f"),
        label("n01", 2.0, 3.0, "V", "f"),
        label("n02", 0.0, 3.0, "I", "Bb"),
    ]);
    (notes, labels)
}

#[test]
fn chord_label_to_overlapping_slices() {
    let (notes, labels) = sample_corpus();

    // Take the first chord of piece 1 and find the slices it covers.
    let chords = labels.piece_rows("ABC", "n01").unwrap();
    let chord0 = chords[0];
    assert_eq!(chord0.label, "i");

    let hits = notes.overlapping("ABC", "n01", chord0.span).unwrap();
    let spans: Vec<_> = hits.iter().map(|n| n.span).collect();
    assert_eq!(spans, vec![Timespan::new(0.0, 1.0), Timespan::new(1.0, 2.0)]);
}

#[test]
fn annotate_two_pieces_end_to_end() {
    let (notes, labels) = sample_corpus();
    let annotated = annotate(&notes, &labels).unwrap();

    // Row order and originals are preserved exactly.
    assert_eq!(annotated.len(), notes.len());
    for (row, original) in annotated.iter().zip(notes.rows()) {
        assert_eq!(&row.note, original);
    }

    // Piece 1 is annotated against F, piece 2 against Bb.
    let n01: Vec<_> = annotated.iter().filter(|r| r.note.piece == "n01").collect();
    assert!(n01.iter().all(|r| r.global_root == "F"));
    assert!(n01.iter().all(|r| r.global_root_tpc == -1));
    let names: Vec<_> = n01.iter().map(|r| r.relative_pitch_name.as_str()).collect();
    assert_eq!(names, vec!["1", "b3", "5"]);
    assert_eq!(n01[1].pitch_name, "Ab4");
    assert_eq!(n01[1].octave, 4);

    let n02: Vec<_> = annotated.iter().filter(|r| r.note.piece == "n02").collect();
    assert!(n02.iter().all(|r| r.global_root == "Bb"));
    let names: Vec<_> = n02.iter().map(|r| r.relative_pitch_name.as_str()).collect();
    assert_eq!(names, vec!["1", "3", "5"]);
}

#[test]
fn annotate_fails_without_labels_for_a_piece() {
    let (notes, _) = sample_corpus();
    // Labels only cover piece 1.
    let labels = Facet::new(vec![label("n01", 0.0, 3.0, "i", "f")]);
    let err = annotate(&notes, &labels).unwrap_err();
    assert_eq!(
        err,
        PitchError::MissingKey {
            corpus: "ABC".into(),
            piece: "n02".into(),
        }
    );
}

#[test]
fn resolve_key_matches_annotation_root() {
    let (_, labels) = sample_corpus();
    let key = resolve_key(&labels, "ABC", "n01").unwrap();
    assert_eq!(key.to_string(), "F minor");
}

#[test]
fn annotated_rows_serialize() {
    let (notes, labels) = sample_corpus();
    let annotated = annotate(&notes, &labels).unwrap();
    let json = serde_json::to_string(&annotated).unwrap();
    let back: Vec<tonalign_pitch::AnnotatedNote> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, annotated);
}
