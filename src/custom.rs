//! Note-by-note chord input, e.g. `C E G`, `0,4,7` or `Eb-G-Bb-D`.
//!
//! Anything other than `A-G a-g b # 0-9` separates notes. A note is either a
//! letter with an optional `b`/`#`, or a pitch number of one or two digits
//! (reduced modulo 12).

use crate::error::ChordError;
use crate::tables::{accidental_shift, note_value};
use crate::types::{pitch_class, Chord, PitchClass};

fn is_note_char(c: char) -> bool {
    matches!(c, 'A'..='G' | 'a'..='g' | '#' | '0'..='9')
}

/// Parse custom input into a chord, keeping the order given by the user.
///
/// ```
/// use chordshape::interpret_custom;
///
/// assert_eq!(interpret_custom("E G C E").unwrap().pitches(), &[4, 7, 0]);
/// assert_eq!(interpret_custom("0-3-7").unwrap().pitches(), &[0, 3, 7]);
/// ```
pub fn interpret_custom(request: &str) -> Result<Chord, ChordError> {
    let chars: Vec<char> = request.chars().collect();
    let mut idx = 0;
    let mut notes: Vec<PitchClass> = Vec::new();

    loop {
        while idx < chars.len() && !is_note_char(chars[idx]) {
            idx += 1;
        }
        if idx == chars.len() {
            break;
        }
        notes.push(parse_token(&chars, &mut idx)?);
    }

    log::debug!("custom input {:?} read as {:?}", request, notes);
    Chord::new(notes).map_err(|_| ChordError::CustomInputNotRecognized)
}

fn parse_token(chars: &[char], idx: &mut usize) -> Result<PitchClass, ChordError> {
    let c = chars[*idx];
    if let Some(first) = c.to_digit(10) {
        *idx += 1;
        let mut value = first;
        if let Some(second) = chars.get(*idx).and_then(|c| c.to_digit(10)) {
            value = value * 10 + second;
            *idx += 1;
        }
        return Ok(pitch_class(value as i32));
    }

    // A "#" here has no letter to attach to; a lowercase "b" is the note B.
    let base = note_value(c).ok_or(ChordError::CustomInputNotRecognized)?;
    *idx += 1;
    let mut shift = 0;
    if let Some(&next) = chars.get(*idx) {
        if next == 'b' || next == '#' {
            shift = accidental_shift(next);
            *idx += 1;
        }
    }
    Ok(pitch_class(base as i32 + shift))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_accidentals() {
        let chord = interpret_custom("Eb G Bb D").unwrap();
        assert_eq!(chord.pitches(), &[3, 7, 10, 2]);
    }

    #[test]
    fn test_numbers_wrap() {
        let chord = interpret_custom("12 16 19").unwrap();
        assert_eq!(chord.pitches(), &[0, 4, 7]);
    }

    #[test]
    fn test_mixed_separators() {
        let chord = interpret_custom("(c, e; g)").unwrap();
        assert_eq!(chord.pitches(), &[0, 4, 7]);
    }

    #[test]
    fn test_flat_below_c_wraps() {
        assert_eq!(interpret_custom("Cb").unwrap().pitches(), &[11]);
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(interpret_custom("G C G E C").unwrap().pitches(), &[7, 0, 4]);
    }

    #[test]
    fn test_unrecognised_input() {
        for s in ["", "   ", "xyz", "#C"] {
            assert!(
                matches!(interpret_custom(s), Err(ChordError::CustomInputNotRecognized)),
                "{s:?} should not parse"
            );
        }
    }
}
