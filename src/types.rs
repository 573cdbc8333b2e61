//! Core value types shared by the interpreter, the search and the renderers.
//!
//! ```text
//! Chord    ordered, duplicate-free pitch classes (bass first when one was given)
//! Voicing  one fret per string, MUTED (-1) for strings that are not played
//! ```

use crate::error::ChordError;
use std::fmt;

/// Semitone distance from C, always in `0..12`.
pub type PitchClass = u8;

/// Fret number on one string. [`MUTED`] marks a string that is not played.
pub type Fret = i32;

/// Fret value of a muted string.
pub const MUTED: Fret = -1;

/// Reduce any signed semitone count to a pitch class.
pub fn pitch_class(semitones: i32) -> PitchClass {
    semitones.rem_euclid(12) as PitchClass
}

/// Ordered, duplicate-free set of pitch classes making up a chord.
///
/// The first entry is the designated bass: the slash note when one was
/// requested, otherwise the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pitches: Vec<PitchClass>,
}

impl Chord {
    /// Build a chord from pitch classes, reducing them modulo 12 and dropping
    /// repeats (first occurrence wins).
    ///
    /// ```
    /// use chordshape::Chord;
    ///
    /// let chord = Chord::new([0, 7, 4, 12, 7]).unwrap();
    /// assert_eq!(chord.pitches(), &[0, 7, 4]);
    /// ```
    pub fn new(pitches: impl IntoIterator<Item = PitchClass>) -> Result<Self, ChordError> {
        let mut out: Vec<PitchClass> = Vec::new();
        for p in pitches {
            let p = p % 12;
            if !out.contains(&p) {
                out.push(p);
            }
        }
        if out.is_empty() {
            return Err(ChordError::InvalidChordStructure);
        }
        Ok(Self { pitches: out })
    }

    pub fn pitches(&self) -> &[PitchClass] {
        &self.pitches
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    pub fn bass(&self) -> PitchClass {
        self.pitches[0]
    }

    pub fn contains(&self, pitch: PitchClass) -> bool {
        self.pitches.contains(&pitch)
    }

    /// Keep only the first `n` pitch classes (at least one).
    pub fn truncated(&self, n: usize) -> Chord {
        let n = n.clamp(1, self.pitches.len());
        Chord {
            pitches: self.pitches[..n].to_vec(),
        }
    }
}

/// One concrete way of fretting a chord: a fret (or [`MUTED`]) per string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voicing {
    pub frets: Vec<Fret>,
}

impl Voicing {
    pub fn new(frets: Vec<Fret>) -> Self {
        Self { frets }
    }
}

/// Formats as `x 3 2 0 1 0`.
impl fmt::Display for Voicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .frets
            .iter()
            .map(|&fret| {
                if fret == MUTED {
                    "x".to_string()
                } else {
                    fret.to_string()
                }
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// A voicing together with its rank score (lower is better).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedVoicing {
    pub voicing: Voicing,
    pub score: f64,
}
