//! # Voicing Ranking
//!
//! A voicing's score is a weighted sum of nine independent heuristics. Larger
//! is worse. The weights come from a ranking preset or the settings file; the
//! ranker itself has no defaults.
//!
//! | # | Heuristic      | Measures                                                   |
//! |---|----------------|------------------------------------------------------------|
//! | 0 | `Reach`        | highest minus lowest pressed fret                          |
//! | 1 | `Spread`       | highest minus lowest played fret (open strings included)   |
//! | 2 | `Fingers`      | number of pressed strings                                  |
//! | 3 | `PitchHigh`    | highest fret, mutes included as -1                         |
//! | 4 | `PitchLow`     | lowest played fret                                         |
//! | 5 | `Completeness` | chord notes not sounded anywhere                           |
//! | 6 | `Mute`         | `2^muted - 1`                                              |
//! | 7 | `Structure`    | how far important notes sit from the prominent strings     |
//! | 8 | `Bass`         | 0 if the most prominent played string sounds the bass      |
//!
//! A string is *played* unless muted, and *pressed* when it is played above
//! its starting fret (so an open string is played but not pressed).
//!
//! Every function here expects one fret per string of the instrument.

use crate::instrument::Instrument;
use crate::types::{Chord, Fret, PitchClass, MUTED};
use serde::{Deserialize, Serialize};

/// Coefficients for the nine heuristics, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(pub [f64; 9]);

impl Weights {
    /// Named ranking preset.
    ///
    /// ```
    /// use chordshape::Weights;
    ///
    /// let w = Weights::preset("UKULELE").unwrap();
    /// assert_eq!(w.0, [1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    /// ```
    pub fn preset(name: &str) -> Option<Weights> {
        let w = match name {
            "UKULELE" => [1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "GUITAR" => [3.0, 0.0, 3.0, 1.0, 0.0, 5.0, 2.0, 5.0, 8.0],
            "BANJO" => [2.0, 1.0, 3.0, 0.0, 1.0, 0.0, 3.0, 2.0, 1.0],
            _ => return None,
        };
        Some(Weights(w))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    Reach,
    Spread,
    Fingers,
    PitchHigh,
    PitchLow,
    Completeness,
    Mute,
    Structure,
    Bass,
}

impl Heuristic {
    /// Heuristics in the order their weights appear in [`Weights`].
    pub const ALL: [Heuristic; 9] = [
        Heuristic::Reach,
        Heuristic::Spread,
        Heuristic::Fingers,
        Heuristic::PitchHigh,
        Heuristic::PitchLow,
        Heuristic::Completeness,
        Heuristic::Mute,
        Heuristic::Structure,
        Heuristic::Bass,
    ];

    pub fn evaluate(self, frets: &[Fret], chord: &Chord, instrument: &Instrument) -> f64 {
        debug_assert_eq!(frets.len(), instrument.string_count());
        match self {
            Heuristic::Reach => reach(frets, instrument),
            Heuristic::Spread => spread(frets, instrument),
            Heuristic::Fingers => fingers(frets, instrument),
            Heuristic::PitchHigh => pitch_high(frets),
            Heuristic::PitchLow => pitch_low(frets, instrument),
            Heuristic::Completeness => completeness(frets, chord, instrument),
            Heuristic::Mute => mute(frets, instrument),
            Heuristic::Structure => structure(frets, chord, instrument),
            Heuristic::Bass => bass(frets, chord, instrument),
        }
    }
}

/// Score a voicing. Pure and deterministic; lower is better.
///
/// `frets` must hold exactly one entry per string of `instrument`.
///
/// ```
/// use chordshape::{rank, Chord, Instrument, Weights};
///
/// let ukulele = Instrument::preset("UKULELE").unwrap().instrument;
/// let c = Chord::new([0, 7, 4]).unwrap();
/// let w = Weights::preset("UKULELE").unwrap();
/// // reach 0, spread 3, one finger, top fret 3
/// assert_eq!(rank(&[0, 0, 0, 3], &c, &ukulele, &w), 0.0 + 6.0 + 3.0 + 3.0);
/// ```
pub fn rank(frets: &[Fret], chord: &Chord, instrument: &Instrument, weights: &Weights) -> f64 {
    debug_assert_eq!(frets.len(), instrument.string_count());
    Heuristic::ALL
        .iter()
        .zip(weights.0.iter())
        .fold(0.0, |acc, (h, w)| acc + w * h.evaluate(frets, chord, instrument))
}

fn pressed(frets: &[Fret], instrument: &Instrument) -> Vec<Fret> {
    frets
        .iter()
        .zip(&instrument.string_starts)
        .filter(|&(&f, &start)| f > start)
        .map(|(&f, _)| f)
        .collect()
}

fn played(frets: &[Fret], instrument: &Instrument) -> Vec<Fret> {
    frets
        .iter()
        .zip(&instrument.string_starts)
        .filter(|&(&f, &start)| f >= start)
        .map(|(&f, _)| f)
        .collect()
}

fn range(values: &[Fret]) -> f64 {
    match (values.iter().max(), values.iter().min()) {
        (Some(hi), Some(lo)) => (hi - lo) as f64,
        _ => 0.0,
    }
}

/// Notes sounded per string, `None` for muted strings.
fn sounded(frets: &[Fret], instrument: &Instrument) -> Vec<Option<PitchClass>> {
    frets
        .iter()
        .enumerate()
        .map(|(i, &f)| instrument.pitch_at(i, f))
        .collect()
}

pub fn reach(frets: &[Fret], instrument: &Instrument) -> f64 {
    range(&pressed(frets, instrument))
}

pub fn spread(frets: &[Fret], instrument: &Instrument) -> f64 {
    range(&played(frets, instrument))
}

pub fn fingers(frets: &[Fret], instrument: &Instrument) -> f64 {
    pressed(frets, instrument).len() as f64
}

pub fn pitch_high(frets: &[Fret]) -> f64 {
    frets.iter().max().map_or(0.0, |&f| f as f64)
}

pub fn pitch_low(frets: &[Fret], instrument: &Instrument) -> f64 {
    played(frets, instrument).iter().min().map_or(0.0, |&f| f as f64)
}

pub fn completeness(frets: &[Fret], chord: &Chord, instrument: &Instrument) -> f64 {
    let notes = sounded(frets, instrument);
    chord
        .pitches()
        .iter()
        .filter(|&&p| !notes.contains(&Some(p)))
        .count() as f64
}

pub fn mute(frets: &[Fret], instrument: &Instrument) -> f64 {
    let muted = frets.len() - played(frets, instrument).len();
    (2f64).powi(muted as i32) - 1.0
}

/// For each chord note in priority order `i`, find the most prominent string
/// sounding it and add `|i - rank| / 2^i`, where ranks are shifted down by the
/// number of muted strings. The total is divided by the number of unmuted
/// strings.
pub fn structure(frets: &[Fret], chord: &Chord, instrument: &Instrument) -> f64 {
    let notes = sounded(frets, instrument);
    let muted = frets.iter().rposition(|&f| f == MUTED).map_or(0, |i| i + 1);
    let unmuted = frets.len() - muted;
    if unmuted == 0 {
        return 0.0;
    }

    let mut out = 0.0;
    for (i, &pitch) in chord.pitches().iter().enumerate() {
        let lowest = notes
            .iter()
            .enumerate()
            .filter(|(_, n)| **n == Some(pitch))
            .map(|(j, _)| instrument.order[j] as i64 - muted as i64)
            .min();
        if let Some(lowest) = lowest {
            out += (i as i64 - lowest).abs() as f64 / (2f64).powi(i as i32);
        }
    }
    out / unmuted as f64
}

/// 0 when the most prominent played string sounds the chord's bass, 1 otherwise.
pub fn bass(frets: &[Fret], chord: &Chord, instrument: &Instrument) -> f64 {
    let notes = sounded(frets, instrument);
    let lowest = notes
        .iter()
        .enumerate()
        .filter_map(|(j, n)| n.map(|p| (instrument.order[j], p)))
        .min_by_key(|(order, _)| *order);
    match lowest {
        Some((_, pitch)) if pitch == chord.bass() => 0.0,
        _ => 1.0,
    }
}
