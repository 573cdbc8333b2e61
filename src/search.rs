//! # Position Search
//!
//! Enumerates every way of fretting a chord and keeps the best few.
//!
//! ## Pipeline
//! 1. **Playable frets** - per string, the frets (and the mute, when allowed)
//!    that sound a chord note
//! 2. **Traversal** - a mixed-radix counter walks the product of those lists,
//!    string 0 changing fastest
//! 3. **Validity** - mutes form a run from string 0, every required note is
//!    sounded, and the optional fret floor holds
//! 4. **Selection** - valid voicings are ranked into a bounded shortlist
//!
//! ## Pruning
//! The traversal tracks how many required notes are missing. With `k` notes
//! missing, changing only the `k - 1` fastest strings cannot fix the voicing,
//! so those counters are reset and the `k`-th one advances directly. The
//! skipped region never contains a valid voicing, so the search stays
//! exhaustive.
//!
//! ## Coverage tracking
//! Instead of recomputing the sounded notes of every candidate, a per-pitch
//! string count is updated only for the strings the counter reports as
//! changed.

use crate::error::ChordError;
use crate::instrument::Instrument;
use crate::rank::{rank, Weights};
use crate::types::{Chord, Fret, PitchClass, RankedVoicing, Voicing, MUTED};

/// Per-query search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// How many chord notes (from the front) must be sounded. 0 means all of
    /// them; the value is capped at the string count.
    pub important: usize,
    /// 1-based rank of the voicing to return. Asking past the end returns the
    /// worst voicing found.
    pub index: usize,
    /// When set, at least one string must be pressed and every pressed string
    /// must sit at or above this fret.
    pub min_fret: Option<Fret>,
    /// Stop after visiting this many positions and keep the best found so far.
    pub max_iterations: Option<u64>,
    /// Keep every valid voicing in [`SearchResult::candidates`].
    pub collect_all: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            important: 0,
            index: 1,
            min_fret: None,
            max_iterations: None,
            collect_all: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The voicing at the requested rank (or the worst one found).
    pub selected: Voicing,
    pub score: f64,
    /// Number of voicings that passed every validity check.
    pub valid_count: usize,
    /// Best voicings in ascending score order, at most `index` of them.
    pub shortlist: Vec<RankedVoicing>,
    /// All valid voicings in traversal order, only with `collect_all`.
    pub candidates: Option<Vec<Voicing>>,
}

/// Frets on each string that sound a note of `chord`, preceded by [`MUTED`]
/// for strings that may be muted.
///
/// # Errors
/// [`ChordError::NoValidPositions`] when some string has no option at all.
pub fn playable_frets(chord: &Chord, instrument: &Instrument) -> Result<Vec<Vec<Fret>>, ChordError> {
    let mut choices = Vec::with_capacity(instrument.string_count());
    for string in 0..instrument.string_count() {
        let mut frets = Vec::new();
        if string < instrument.mutable {
            frets.push(MUTED);
        }
        for fret in instrument.string_starts[string]..=instrument.frets {
            if instrument.pitch_at(string, fret).is_some_and(|p| chord.contains(p)) {
                frets.push(fret);
            }
        }
        if frets.is_empty() {
            log::debug!("string {} cannot play any of {:?}", string, chord.pitches());
            return Err(ChordError::NoValidPositions);
        }
        choices.push(frets);
    }
    Ok(choices)
}

/// Mixed-radix counter over per-string choices; digit 0 is the fastest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FretCounter {
    radices: Vec<usize>,
    digits: Vec<usize>,
}

impl FretCounter {
    pub fn new(radices: Vec<usize>) -> Self {
        let digits = vec![0; radices.len()];
        Self { radices, digits }
    }

    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// Step to the next position worth visiting while `missing` required
    /// notes are absent. The `missing - 1` fastest digits are reset first.
    ///
    /// Returns how many low-order digits may have changed.
    ///
    /// ```
    /// use chordshape::search::FretCounter;
    ///
    /// let mut counter = FretCounter::new(vec![3, 3, 3]);
    /// assert_eq!(counter.advance(0), 1);
    /// assert_eq!(counter.digits(), &[1, 0, 0]);
    /// // two notes missing: digit 0 is reset and digit 1 moves
    /// assert_eq!(counter.advance(2), 2);
    /// assert_eq!(counter.digits(), &[0, 1, 0]);
    /// ```
    pub fn advance(&mut self, missing: usize) -> usize {
        let n = self.digits.len();
        let skip = missing.saturating_sub(1).min(n);
        for d in &mut self.digits[..skip] {
            *d = 0;
        }
        for i in skip..n {
            if self.digits[i] + 1 < self.radices[i] {
                self.digits[i] += 1;
                return i + 1;
            }
            self.digits[i] = 0;
        }
        n
    }
}

/// How many strings sound each pitch class, and which required ones are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Coverage {
    counts: [u32; 12],
    required: u16,
    missing: u16,
}

impl Coverage {
    fn new(required: &[PitchClass]) -> Self {
        let required = required.iter().fold(0u16, |mask, &p| mask | (1 << p));
        Self {
            counts: [0; 12],
            required,
            missing: required,
        }
    }

    fn add(&mut self, pitch: PitchClass) {
        let p = pitch as usize;
        self.counts[p] += 1;
        if self.counts[p] == 1 {
            self.missing &= !(1 << p);
        }
    }

    fn remove(&mut self, pitch: PitchClass) {
        let p = pitch as usize;
        self.counts[p] -= 1;
        if self.counts[p] == 0 {
            self.missing |= self.required & (1 << p);
        }
    }

    fn missing_count(&self) -> usize {
        self.missing.count_ones() as usize
    }

    fn is_complete(&self) -> bool {
        self.missing == 0
    }
}

/// Fixed-capacity list of ranked voicings, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortlist {
    capacity: usize,
    entries: Vec<RankedVoicing>,
}

impl Shortlist {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Insert `frets` if there is room or it beats the current worst entry.
    /// Ties keep the earlier voicing ahead. Returns whether it was kept.
    pub fn offer(&mut self, frets: &[Fret], score: f64) -> bool {
        let pos = self.entries.partition_point(|e| e.score <= score);
        if self.entries.len() >= self.capacity && pos == self.entries.len() {
            return false;
        }
        self.entries.insert(
            pos,
            RankedVoicing {
                voicing: Voicing::new(frets.to_vec()),
                score,
            },
        );
        self.entries.truncate(self.capacity);
        true
    }

    pub fn worst(&self) -> Option<&RankedVoicing> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[RankedVoicing] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RankedVoicing> {
        self.entries
    }
}

/// Muted strings must be a run starting at string 0.
pub fn mutes_contiguous(frets: &[Fret]) -> bool {
    let muted = frets.iter().filter(|&&f| f == MUTED).count();
    frets[..muted].iter().all(|&f| f == MUTED)
}

/// At least one string pressed, and none pressed below `floor`.
pub fn meets_floor(frets: &[Fret], instrument: &Instrument, floor: Fret) -> bool {
    frets
        .iter()
        .zip(&instrument.string_starts)
        .filter(|&(&f, &start)| f > start)
        .map(|(&f, _)| f)
        .min()
        .is_some_and(|lowest| lowest >= floor)
}

/// Find the `options.index`-th best voicing of `chord` on `instrument`.
///
/// The chord is cut to as many notes as the instrument has strings before
/// searching, so quality tables should list the important notes first.
///
/// # Example
/// ```
/// use chordshape::{find, Chord, Instrument, SearchOptions, Weights};
///
/// let ukulele = Instrument::preset("UKULELE").unwrap().instrument;
/// let c = Chord::new([0, 7, 4]).unwrap();
/// let result = find(&c, &ukulele, &Weights::preset("UKULELE").unwrap(), &SearchOptions::default()).unwrap();
/// assert_eq!(result.selected.frets, vec![0, 0, 0, 3]);
/// ```
///
/// # Errors
/// - [`ChordError::InvalidInstrument`] for inconsistent geometry
/// - [`ChordError::NoValidPositions`] when a string cannot play any chord note
/// - [`ChordError::NoSolutionsFound`] when no voicing passes the checks
pub fn find(
    chord: &Chord,
    instrument: &Instrument,
    weights: &Weights,
    options: &SearchOptions,
) -> Result<SearchResult, ChordError> {
    instrument.validate()?;
    let n = instrument.string_count();
    let chord = chord.truncated(n);

    let important = match options.important {
        0 => chord.len(),
        k => k,
    }
    .min(n)
    .min(chord.len());
    let required = &chord.pitches()[..important];

    let choices = playable_frets(&chord, instrument)?;
    let mut counter = FretCounter::new(choices.iter().map(Vec::len).collect());
    let mut attempt: Vec<Fret> = choices.iter().map(|c| c[0]).collect();

    let mut coverage = Coverage::new(required);
    for (string, &fret) in attempt.iter().enumerate() {
        if let Some(p) = instrument.pitch_at(string, fret) {
            coverage.add(p);
        }
    }

    let mut shortlist = Shortlist::new(options.index);
    let mut candidates = options.collect_all.then(Vec::new);
    let mut valid_count = 0;
    let mut visited: u64 = 0;

    loop {
        let valid = coverage.is_complete()
            && mutes_contiguous(&attempt)
            && options
                .min_fret
                .map_or(true, |floor| meets_floor(&attempt, instrument, floor));
        if valid {
            let score = rank(&attempt, &chord, instrument, weights);
            shortlist.offer(&attempt, score);
            valid_count += 1;
            if let Some(all) = candidates.as_mut() {
                all.push(Voicing::new(attempt.clone()));
            }
        }

        visited += 1;
        if options.max_iterations.is_some_and(|limit| visited >= limit) {
            log::warn!(
                "search stopped after {} positions; results may not be optimal",
                visited
            );
            break;
        }

        let changed = counter.advance(coverage.missing_count());
        for string in 0..changed {
            if let Some(p) = instrument.pitch_at(string, attempt[string]) {
                coverage.remove(p);
            }
            attempt[string] = choices[string][counter.digits()[string]];
        }
        for string in 0..changed {
            if let Some(p) = instrument.pitch_at(string, attempt[string]) {
                coverage.add(p);
            }
        }

        if counter.is_zero() {
            break;
        }
    }

    log::debug!(
        "visited {} positions for {:?}: {} valid, {} kept",
        visited,
        chord.pitches(),
        valid_count,
        shortlist.entries().len()
    );

    let worst = shortlist.worst().cloned().ok_or(ChordError::NoSolutionsFound)?;
    Ok(SearchResult {
        selected: worst.voicing,
        score: worst.score,
        valid_count,
        shortlist: shortlist.into_entries(),
        candidates,
    })
}
