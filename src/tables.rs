//! Lookup tables for chord names
//!
//! All tables are compile-time constants exposed through lookup functions that
//! return `Option`, so an unknown token is an ordinary value rather than a
//! failure path.
//!
//! # Quality offsets
//! Offsets are semitones above a C root, listed most important first. Usually
//! the root and fifth lead, because the search requires the first few entries
//! when an instrument has fewer strings than the chord has notes.

use crate::types::PitchClass;

/// Pitch class of a note letter (either case).
pub fn note_value(letter: char) -> Option<PitchClass> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// +1 for `#`, -1 for `b`, 0 for anything else.
pub fn accidental_shift(symbol: char) -> i32 {
    match symbol {
        '#' => 1,
        'b' => -1,
        _ => 0,
    }
}

/// Semitone offsets for a chord quality token (case-sensitive).
///
/// # Examples
/// ```
/// use chordshape::tables::quality_offsets;
///
/// assert_eq!(quality_offsets(""), Some(&[0, 7, 4][..]));
/// assert_eq!(quality_offsets("m7"), Some(&[0, 7, 3, 10][..]));
/// assert_eq!(quality_offsets("M7"), Some(&[0, 7, 4, 11][..]));
/// assert_eq!(quality_offsets("mystery"), None);
/// ```
pub fn quality_offsets(token: &str) -> Option<&'static [PitchClass]> {
    let offsets: &'static [PitchClass] = match token {
        // Triads
        "" | "M" | "maj" | "Maj" => &[0, 7, 4],
        "m" | "Min" | "min" | "-" => &[0, 7, 3],
        "sus2" | "Sus2" => &[0, 2, 7],
        "sus4" | "sus" | "Sus4" | "Sus" => &[0, 5, 7],
        "5" => &[0, 7],
        "dim" | "Dim" => &[0, 3, 6],
        "aug" | "Aug" | "+" => &[0, 4, 8],

        // Sixths
        "mb6" | "minb6" => &[0, 7, 3, 8],
        "m6" | "min6" | "Min6" => &[0, 7, 3, 9],
        "6" | "add6" | "Add6" | "add13" | "Add13" => &[0, 7, 4, 9],

        // Sevenths
        "m7" | "min7" | "Min7" => &[0, 7, 3, 10],
        "7" => &[0, 7, 10, 4],
        "M7" | "maj7" | "Maj7" | "delta" | "Delta" => &[0, 7, 4, 11],
        "dim7" | "Dim7" => &[0, 3, 6, 9],
        "7sus4" | "7Sus4" | "7sus" | "7Sus" => &[0, 5, 7, 10],
        "7sus2" | "7Sus2" => &[0, 2, 7, 10],
        "aug7" | "Aug7" | "+7" | "7aug" | "7Aug" | "7+" => &[0, 4, 8, 10],
        "mM7" | "minM7" | "mm7" => &[0, 7, 3, 11],
        "augmaj7" | "Augmaj7" | "augMaj7" | "AugMaj7" | "augM7" | "AugM7" | "M7#5" | "M7+5"
        | "+M7" | "+maj7" | "+Maj7" => &[0, 4, 8, 11],

        // Ninths and added tones
        "9" => &[0, 2, 7, 4, 10],
        "M9" | "Maj9" | "maj9" => &[0, 2, 7, 4, 11],
        "add9" | "Add9" | "Madd9" | "MAdd9" => &[0, 7, 2, 4],
        "madd9" | "mAdd9" => &[0, 2, 7, 3],
        "add#9" | "Madd#9" => &[0, 7, 4, 3],

        // Elevenths
        "11" => &[0, 5, 7, 10, 2, 4],
        "M11" | "maj11" | "Maj11" => &[0, 2, 7, 5, 4, 11],
        "mMaj11" | "-M11" | "mM11" => &[0, 2, 7, 5, 3, 11],
        "m11" | "-11" | "min11" => &[0, 2, 7, 5, 3, 10],
        "add11" | "Add11" => &[0, 7, 5, 4],

        // Thirteenths
        "13" => &[0, 9, 7, 4, 10, 2, 5],
        "m13" | "min13" | "Min13" => &[0, 9, 7, 3, 10, 2, 5],
        "M13" | "maj13" | "Maj13" => &[0, 9, 7, 3, 11, 2, 5],
        "13sus4" => &[0, 7, 9, 5, 10, 2],

        _ => return None,
    };
    Some(offsets)
}

/// The two positions an altered degree moves between, as `(flat, sharp)`.
///
/// Sharpening raises the flat entry; flattening lowers the sharp entry. Only
/// the seventh and third have distinct entries.
pub fn alteration_pair(degree: u32) -> Option<(PitchClass, PitchClass)> {
    match degree {
        1 => Some((0, 0)),
        2 | 9 => Some((2, 2)),
        3 => Some((3, 4)),
        4 | 11 => Some((5, 5)),
        5 => Some((7, 7)),
        6 | 13 => Some((9, 9)),
        7 => Some((10, 11)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_values_case_insensitive() {
        assert_eq!(note_value('c'), Some(0));
        assert_eq!(note_value('B'), Some(11));
        assert_eq!(note_value('H'), None);
    }

    #[test]
    fn test_quality_tokens_are_case_sensitive() {
        assert_eq!(quality_offsets("m"), Some(&[0, 7, 3][..]));
        assert_eq!(quality_offsets("M"), Some(&[0, 7, 4][..]));
        assert_eq!(quality_offsets("MAJ"), None);
    }

    #[test]
    fn test_quality_entries_are_pitch_classes_without_repeats() {
        let tokens = [
            "", "m", "sus2", "sus4", "5", "dim", "aug", "mb6", "m6", "6", "m7", "7", "M7",
            "dim7", "7sus4", "7sus2", "aug7", "mM7", "augmaj7", "9", "M9", "add9", "madd9",
            "add#9", "11", "M11", "mMaj11", "m11", "add11", "13", "m13", "M13", "13sus4",
        ];
        for token in tokens {
            let offsets = quality_offsets(token).unwrap();
            assert_eq!(offsets[0], 0, "{token} should start at the root");
            for (i, o) in offsets.iter().enumerate() {
                assert!(*o < 12);
                assert!(!offsets[i + 1..].contains(o), "{token} repeats {o}");
            }
        }
    }

    #[test]
    fn test_alteration_degrees() {
        for degree in [1, 2, 3, 4, 5, 6, 7, 9, 11, 13] {
            assert!(alteration_pair(degree).is_some());
        }
        for degree in [0, 8, 10, 12, 14, 15] {
            assert!(alteration_pair(degree).is_none());
        }
        assert_eq!(alteration_pair(7), Some((10, 11)));
    }
}
