//! # Instrument Geometry
//!
//! Per-string data the search needs: the pitch class at fret 0, the lowest
//! playable fret, how many strings may be muted and the importance order used
//! by the ranking heuristics.
//!
//! ## Imagined neck
//! A string that starts above fret 0 (the banjo's short fifth string starts at
//! fret 5) is modelled as if it ran the full length of the neck. Its `tuning`
//! entry is the pitch it would have at fret 0, and `string_starts` hides the
//! frets below its real start. [`Instrument::from_open_strings`] performs the
//! conversion from real open-string pitches.
//!
//! ## Muting
//! Only the first `mutable` strings (counting from string 0) may be muted, and
//! muted strings must form a contiguous run starting at string 0.

use crate::error::ChordError;
use crate::types::{pitch_class, Fret, PitchClass};

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    /// Pitch class at fret 0 of the imagined neck, one per string.
    pub tuning: Vec<PitchClass>,
    /// Highest fret.
    pub frets: Fret,
    /// Number of strings, counted from string 0, that may be muted.
    pub mutable: usize,
    /// Importance rank per string; 0 is the string expected to carry the bass.
    pub order: Vec<usize>,
    /// Lowest playable fret per string.
    pub string_starts: Vec<Fret>,
}

impl Instrument {
    /// Instrument with no muting, linear order and every string starting at fret 0.
    ///
    /// ```
    /// use chordshape::Instrument;
    ///
    /// let ukulele = Instrument::new(vec![7, 0, 4, 9], 12);
    /// assert_eq!(ukulele.string_count(), 4);
    /// assert_eq!(ukulele.order, vec![0, 1, 2, 3]);
    /// ```
    pub fn new(tuning: Vec<PitchClass>, frets: Fret) -> Self {
        let n = tuning.len();
        Self {
            tuning,
            frets,
            mutable: 0,
            order: (0..n).collect(),
            string_starts: vec![0; n],
        }
    }

    /// Build from real open-string pitches, converting strings that start
    /// above fret 0 to the imagined-neck tuning.
    pub fn from_open_strings(
        open: &[PitchClass],
        frets: Fret,
        mutable: usize,
        order: Vec<usize>,
        string_starts: Vec<Fret>,
    ) -> Result<Self, ChordError> {
        if open.len() != string_starts.len() {
            return Err(ChordError::InvalidInstrument(format!(
                "{} tuning entries but {} string starts",
                open.len(),
                string_starts.len()
            )));
        }
        let tuning = open
            .iter()
            .zip(&string_starts)
            .map(|(&p, &start)| pitch_class(p as i32 - start))
            .collect();
        let instrument = Self {
            tuning,
            frets,
            mutable,
            order,
            string_starts,
        };
        instrument.validate()?;
        Ok(instrument)
    }

    pub fn with_mutable(mut self, mutable: usize) -> Self {
        self.mutable = mutable;
        self
    }

    pub fn with_order(mut self, order: Vec<usize>) -> Self {
        self.order = order;
        self
    }

    pub fn string_count(&self) -> usize {
        self.tuning.len()
    }

    /// Pitch class sounded by `string` at `fret`, or `None` when muted.
    pub fn pitch_at(&self, string: usize, fret: Fret) -> Option<PitchClass> {
        if fret < self.string_starts[string] {
            None
        } else {
            Some(pitch_class(self.tuning[string] as i32 + fret))
        }
    }

    /// Check that the per-string lists agree and hold sensible values.
    pub fn validate(&self) -> Result<(), ChordError> {
        let n = self.tuning.len();
        if n == 0 {
            return Err(ChordError::InvalidInstrument("no strings".to_string()));
        }
        if self.tuning.iter().any(|&p| p >= 12) {
            return Err(ChordError::InvalidInstrument(
                "tuning entries must be pitch classes 0-11".to_string(),
            ));
        }
        if self.frets < 1 {
            return Err(ChordError::InvalidInstrument(format!(
                "fret count must be positive, got {}",
                self.frets
            )));
        }
        if self.order.len() != n || self.string_starts.len() != n {
            return Err(ChordError::InvalidInstrument(format!(
                "{} strings but {} order entries and {} string starts",
                n,
                self.order.len(),
                self.string_starts.len()
            )));
        }
        let mut sorted = self.order.clone();
        sorted.sort_unstable();
        if sorted.iter().enumerate().any(|(i, &o)| i != o) {
            return Err(ChordError::InvalidInstrument(format!(
                "order {:?} must list each of 0..{} once",
                self.order, n
            )));
        }
        if let Some(start) = self.string_starts.iter().find(|&&s| s < 0 || s > self.frets) {
            return Err(ChordError::InvalidInstrument(format!(
                "string start {} outside 0..={}",
                start, self.frets
            )));
        }
        Ok(())
    }

    /// Look up a named instrument preset (upper case, e.g. `"GUITAR"`).
    ///
    /// ```
    /// use chordshape::Instrument;
    ///
    /// let banjo = Instrument::preset("BANJO").unwrap().instrument;
    /// // the drone string is G at fret 5, so its imagined fret 0 is D
    /// assert_eq!(banjo.tuning[0], 2);
    /// assert!(Instrument::preset("KAZOO").is_none());
    /// ```
    pub fn preset(name: &str) -> Option<InstrumentPreset> {
        let reentrant = vec![2, 0, 1, 3];
        let linear = vec![0, 1, 2, 3];
        let (open, frets, mutable, important, order, starts): (
            Vec<PitchClass>,
            Fret,
            usize,
            usize,
            Vec<usize>,
            Vec<Fret>,
        ) = match name {
            "UKULELE" | "UKULELE-SOPRANO" | "UKULELE-REENTRANT" | "UKULELE-SOPRANO-REENTRANT" => {
                (vec![7, 0, 4, 9], 12, 0, 4, reentrant, vec![0; 4])
            }
            "UKULELE-D" | "UKULELE-SOPRANO-D" | "UKULELE-D-REENTRANT" | "UKULELE-SOPRANO-D-REENTRANT" => {
                (vec![9, 2, 6, 11], 12, 0, 4, reentrant, vec![0; 4])
            }
            "UKULELE-CONCERT" | "UKULELE-CONCERT-REENTRANT" | "UKULELE-TENOR" | "UKULELE-TENOR-REENTRANT" => {
                (vec![7, 0, 4, 9], 15, 0, 4, reentrant, vec![0; 4])
            }
            "UKULELE-CONCERT-LINEAR" | "UKULELE-TENOR-LINEAR" => {
                (vec![7, 0, 4, 9], 15, 0, 4, linear, vec![0; 4])
            }
            "UKULELE-TENOR-CHICAGO" | "UKULELE-TENOR-CHICAGO-REENTRANT" => {
                (vec![2, 7, 11, 4], 15, 0, 4, reentrant, vec![0; 4])
            }
            "UKULELE-TENOR-CHICAGO-LINEAR" => (vec![2, 7, 11, 4], 15, 0, 4, linear, vec![0; 4]),
            "UKULELE-BARITONE" | "UKULELE-BARITONE-REENTRANT" => {
                (vec![7, 0, 4, 9], 19, 0, 4, reentrant, vec![0; 4])
            }
            "UKULELE-BARITONE-LINEAR" => (vec![7, 0, 4, 9], 19, 0, 4, linear, vec![0; 4]),
            "UKULELE-BARITONE-CHICAGO" | "UKULELE-BARITONE-CHICAGO-REENTRANT" => {
                (vec![2, 7, 11, 4], 19, 0, 4, reentrant, vec![0; 4])
            }
            "UKULELE-BARITONE-CHICAGO-LINEAR" => (vec![2, 7, 11, 4], 19, 0, 4, linear, vec![0; 4]),
            "GUITAR" => (vec![4, 9, 2, 7, 11, 4], 19, 2, 6, (0..6).collect(), vec![0; 6]),
            // Usually not playing complex chords, so three notes are enough.
            "BANJO" => (vec![7, 2, 7, 11, 2], 15, 1, 3, vec![4, 0, 1, 2, 3], vec![5, 0, 0, 0, 0]),
            "SAZ" => (vec![2, 7, 9], 14, 0, 3, vec![2, 0, 1], vec![0; 3]),
            _ => return None,
        };
        let instrument = Instrument::from_open_strings(&open, frets, mutable, order, starts).ok()?;
        Some(InstrumentPreset {
            instrument,
            important,
            tall: name == "BANJO",
        })
    }
}

/// A named instrument plus the defaults that travel with it.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentPreset {
    pub instrument: Instrument,
    /// How many chord notes must be present in a voicing.
    pub important: usize,
    /// Needs one extra diagram row for a string that starts high up the neck.
    pub tall: bool,
}
