// Spelled pitch types on the line of fifths.
//
// A spelled pitch class is a single integer: its position on the line of
// fifths (0 = C, 1 = G, 2 = D, ... -1 = F, -2 = Bb). Moving +7 along the
// line adds a sharp, -7 adds a flat, so the coordinate carries the letter
// and the accidentals at once and enharmonic spellings stay distinct
// (G# = 8, Ab = -4). All pitch arithmetic in this crate is arithmetic on
// that coordinate.
//
// A spelled pitch adds an octave. The octave is the *spelled* octave, tied
// to the letter: Cb4 sounds as midi 59 but lives in octave 4, B#3 sounds
// as midi 60 but lives in octave 3.

use crate::error::PitchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Letters along the line of fifths starting at F (fifths = -1).
const LETTERS: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];

/// A pitch with octave discarded, addressed by its fifths coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpelledPitchClass {
    fifths: i32,
}

impl SpelledPitchClass {
    pub fn new(fifths: i32) -> Self {
        SpelledPitchClass { fifths }
    }

    pub fn fifths(self) -> i32 {
        self.fifths
    }

    /// The letter part of the name (A-G).
    pub fn letter(self) -> char {
        LETTERS[(self.fifths + 1).rem_euclid(7) as usize]
    }

    /// Accidental count: positive for sharps, negative for flats, 0 natural.
    pub fn alteration(self) -> i32 {
        (self.fifths + 1).div_euclid(7)
    }

    /// Chromatic value of the bare letter, 0-11 relative to C.
    fn letter_semitone(self) -> i32 {
        let letter_fifths = self.fifths - 7 * self.alteration();
        (letter_fifths * 7).rem_euclid(12)
    }

    /// Chromatic offset from the C of the same spelled octave. Usually 0-11,
    /// but Cb is -1 and B# is 12.
    pub fn chromatic(self) -> i32 {
        self.letter_semitone() + self.alteration()
    }

    /// Canonical name: letter plus accidental run, e.g. "F", "Bb", "C##".
    pub fn name(self) -> String {
        let alteration = self.alteration();
        let accidentals = if alteration >= 0 {
            "#".repeat(alteration as usize)
        } else {
            "b".repeat(-alteration as usize)
        };
        format!("{}{}", self.letter(), accidentals)
    }

    /// Parse a name: one uppercase letter A-G followed by a run of '#' or
    /// a run of 'b'. Key-name case normalization happens before this
    /// (see `key::normalize_key_name`).
    ///
    /// Failures are reported as `InvalidKeyName` even outside a key
    /// context: annotation key fields are the only external source of
    /// pitch-class names in this pipeline.
    pub fn parse(name: &str) -> Result<Self, PitchError> {
        let invalid = || PitchError::InvalidKeyName(name.to_owned());
        let mut chars = name.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let natural_fifths = match letter {
            'F' => -1,
            'C' => 0,
            'G' => 1,
            'D' => 2,
            'A' => 3,
            'E' => 4,
            'B' => 5,
            _ => return Err(invalid()),
        };
        let suffix = chars.as_str();
        let shift = if suffix.chars().all(|c| c == '#') {
            7 * suffix.len() as i32
        } else if suffix.chars().all(|c| c == 'b') {
            -7 * suffix.len() as i32
        } else {
            return Err(invalid());
        };
        Ok(SpelledPitchClass::new(natural_fifths + shift))
    }
}

impl Sub for SpelledPitchClass {
    type Output = SpelledIntervalClass;

    fn sub(self, other: Self) -> SpelledIntervalClass {
        SpelledIntervalClass::new(self.fifths - other.fifths)
    }
}

impl fmt::Display for SpelledPitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A fully specified pitch: spelled pitch class plus octave
/// (scientific notation, C4 = midi 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpelledPitch {
    class: SpelledPitchClass,
    octave: i32,
}

impl SpelledPitch {
    pub fn new(class: SpelledPitchClass, octave: i32) -> Self {
        SpelledPitch { class, octave }
    }

    pub fn class(self) -> SpelledPitchClass {
        self.class
    }

    pub fn octave(self) -> i32 {
        self.octave
    }

    /// The absolute chromatic code (C4 = 60). Inverse of
    /// `annotate::decode_pitch`.
    pub fn midi(self) -> i32 {
        12 * (self.octave + 1) + self.class.chromatic()
    }

    /// Name with octave, e.g. "Ab4".
    pub fn name(self) -> String {
        format!("{}{}", self.class.name(), self.octave)
    }
}

impl fmt::Display for SpelledPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The difference of two spelled pitch classes, itself addressed by a
/// fifths coordinate (0 = unison, 1 = fifth, 2 = major second, -3 = minor
/// third, ...).
///
/// The canonical name is scale-degree notation relative to the major scale
/// ("1", "b3", "#4", "b7"), matching the notation of the harmonic labels
/// themselves rather than quality notation ("P1", "m3").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpelledIntervalClass {
    fifths: i32,
}

impl SpelledIntervalClass {
    pub fn new(fifths: i32) -> Self {
        SpelledIntervalClass { fifths }
    }

    pub fn fifths(self) -> i32 {
        self.fifths
    }

    /// Generic degree 1-7 (octave-reduced, direction-free).
    pub fn degree(self) -> i32 {
        (self.fifths * 4).rem_euclid(7) + 1
    }

    /// Accidental count relative to the major-scale degree: 0 for the
    /// degrees of the major scale (and perfect 1/4/5), -1 for b3/b6/b7,
    /// +1 for #4, and so on.
    pub fn alteration(self) -> i32 {
        (self.fifths + 1).div_euclid(7)
    }

    /// Scale-degree name, e.g. "1", "b3", "#4".
    pub fn name(self) -> String {
        let alteration = self.alteration();
        let accidentals = if alteration >= 0 {
            "#".repeat(alteration as usize)
        } else {
            "b".repeat(-alteration as usize)
        };
        format!("{}{}", accidentals, self.degree())
    }
}

impl fmt::Display for SpelledIntervalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
