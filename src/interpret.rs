//! # Chord Name Interpreter
//!
//! Turns a chord name such as `Cmaj7(b5)/E` into an ordered list of pitch
//! classes.
//!
//! ## Grammar
//! ```text
//! chord       = root quality alterations? bass?
//! root        = letter ("b" | "#")?            letter is A-G in either case
//! quality     = any text up to "(" or "/"      must be a known quality token
//! alterations = "(" (modifiers degree)+ ")"
//! modifiers   = ("b" | "#")+                   net shift = count("#") - count("b")
//! degree      = [1-9] [0-9]*
//! bass        = "/" letter ("b" | "#")?
//! ```
//! Spaces and the separators `, . _ ; : | > < *` are removed first.
//!
//! ## Alterations
//! Alterations apply left to right to the quality's offsets, so a later one
//! sees the result of the earlier ones. For each degree the table gives a
//! `(flat, sharp)` pair: both are removed from the offsets and the shifted
//! note (`sharp + shift` when flattening, `flat + shift` when sharpening) is
//! added. A modifier run that cancels out (`b#`) is skipped without looking at
//! the degree at all.

use crate::error::ChordError;
use crate::tables::{accidental_shift, alteration_pair, note_value, quality_offsets};
use crate::types::{pitch_class, Chord, PitchClass};

const SEPARATORS: [char; 10] = [' ', ',', '.', '_', ';', ':', '|', '>', '<', '*'];

/// One parenthesised alteration such as `bb7` or `#11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Alteration {
    shift: i32,
    degree: u32,
}

/// Structural pieces of a chord name, before any table lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChordName {
    root: PitchClass,
    quality: String,
    alterations: Vec<Alteration>,
    bass: Option<PitchClass>,
}

/// Interpret a chord name as pitch classes (0 = C, 1 = C#, ..., 11 = B).
///
/// The result is duplicate-free. With a bass note the bass comes first;
/// otherwise the order follows the quality table, root first.
///
/// # Examples
/// ```
/// use chordshape::interpret;
///
/// assert_eq!(interpret("C").unwrap().pitches(), &[0, 7, 4]);
/// assert_eq!(interpret("Am").unwrap().pitches(), &[9, 4, 0]);
/// assert_eq!(interpret("Cmaj7(b5)/E").unwrap().pitches(), &[4, 0, 11, 6]);
/// assert!(interpret("Hmaj7").is_err());
/// ```
///
/// # Errors
/// - [`ChordError::InvalidChordStructure`] if the name does not fit the grammar
///   or the quality is unknown
/// - [`ChordError::InvalidAlteration`] if an alteration names a degree that
///   cannot be altered
pub fn interpret(request: &str) -> Result<Chord, ChordError> {
    let cleaned: String = request.chars().filter(|c| !SEPARATORS.contains(c)).collect();
    let name = parse_name(&cleaned)?;

    let mut offsets: Vec<PitchClass> = quality_offsets(&name.quality)
        .ok_or(ChordError::InvalidChordStructure)?
        .to_vec();

    for alteration in &name.alterations {
        apply_alteration(&mut offsets, *alteration)?;
    }

    let mut pitches: Vec<PitchClass> = offsets
        .iter()
        .map(|&o| pitch_class(name.root as i32 + o as i32))
        .collect();

    if let Some(bass) = name.bass {
        pitches.retain(|&p| p != bass);
        pitches.insert(0, bass);
    }

    let chord = Chord::new(pitches)?;
    log::debug!("interpreted {:?} as {:?}", request, chord.pitches());
    Ok(chord)
}

fn apply_alteration(offsets: &mut Vec<PitchClass>, alteration: Alteration) -> Result<(), ChordError> {
    if alteration.shift == 0 {
        log::trace!("alteration on degree {} cancels out", alteration.degree);
        return Ok(());
    }
    let (flat, sharp) = alteration_pair(alteration.degree).ok_or(ChordError::InvalidAlteration)?;

    let moved = if alteration.shift < 0 { sharp } else { flat };
    let added = pitch_class(moved as i32 + alteration.shift);

    offsets.retain(|&o| o != flat && o != sharp);
    if !offsets.contains(&added) {
        offsets.push(added);
    }
    log::trace!(
        "degree {} shifted by {}: {} -> {}",
        alteration.degree,
        alteration.shift,
        moved,
        added
    );
    Ok(())
}

fn parse_name(s: &str) -> Result<ChordName, ChordError> {
    let chars: Vec<char> = s.chars().collect();
    let mut idx = 0;

    let root = parse_note(&chars, &mut idx).ok_or(ChordError::InvalidChordStructure)?;

    let quality_start = idx;
    while idx < chars.len() && chars[idx] != '(' && chars[idx] != '/' {
        idx += 1;
    }
    let quality: String = chars[quality_start..idx].iter().collect();

    let mut alterations = Vec::new();
    if idx < chars.len() && chars[idx] == '(' {
        idx += 1;
        loop {
            alterations.push(parse_alteration(&chars, &mut idx)?);
            match chars.get(idx) {
                Some(')') => {
                    idx += 1;
                    break;
                }
                Some('b') | Some('#') => continue,
                _ => return Err(ChordError::InvalidChordStructure),
            }
        }
    }

    let mut bass = None;
    if idx < chars.len() && chars[idx] == '/' {
        idx += 1;
        bass = Some(parse_note(&chars, &mut idx).ok_or(ChordError::InvalidChordStructure)?);
    }

    if idx != chars.len() {
        return Err(ChordError::InvalidChordStructure);
    }

    Ok(ChordName {
        root,
        quality,
        alterations,
        bass,
    })
}

/// Note letter with an optional single accidental.
fn parse_note(chars: &[char], idx: &mut usize) -> Option<PitchClass> {
    let base = note_value(*chars.get(*idx)?)?;
    *idx += 1;
    let mut shift = 0;
    if let Some(&c) = chars.get(*idx) {
        if c == 'b' || c == '#' {
            shift = accidental_shift(c);
            *idx += 1;
        }
    }
    Some(pitch_class(base as i32 + shift))
}

fn parse_alteration(chars: &[char], idx: &mut usize) -> Result<Alteration, ChordError> {
    let mut shift = 0;
    let mut modifiers = 0;
    while let Some(&c) = chars.get(*idx) {
        if c != 'b' && c != '#' {
            break;
        }
        shift += accidental_shift(c);
        modifiers += 1;
        *idx += 1;
    }
    if modifiers == 0 {
        return Err(ChordError::InvalidChordStructure);
    }

    // Degrees are written without leading zeros, so "0" is not a number here.
    match chars.get(*idx) {
        Some(c) if ('1'..='9').contains(c) => {}
        _ => return Err(ChordError::InvalidChordStructure),
    }
    let start = *idx;
    while chars.get(*idx).is_some_and(|c| c.is_ascii_digit()) {
        *idx += 1;
    }
    let digits: String = chars[start..*idx].iter().collect();
    // A well-formed digit run too large for u32 is still just an unknown degree.
    let degree = digits
        .parse::<u32>()
        .map_err(|_| ChordError::InvalidAlteration)?;

    Ok(Alteration { shift, degree })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(s: &str) -> Vec<PitchClass> {
        interpret(s).unwrap().pitches().to_vec()
    }

    #[test]
    fn test_plain_triads() {
        assert_eq!(pitches("C"), vec![0, 7, 4]);
        assert_eq!(pitches("Am"), vec![9, 4, 0]);
        assert_eq!(pitches("F#"), vec![6, 1, 10]);
        assert_eq!(pitches("Bbm"), vec![10, 5, 1]);
    }

    #[test]
    fn test_lowercase_root() {
        assert_eq!(pitches("bb"), vec![10, 5, 2]);
        assert_eq!(pitches("e"), vec![4, 11, 8]);
    }

    #[test]
    fn test_separators_are_ignored() {
        assert_eq!(pitches("C m7"), vec![0, 7, 3, 10]);
        assert_eq!(pitches("G.7 / B"), vec![11, 7, 2, 5]);
    }

    #[test]
    fn test_quality_with_symbols() {
        assert_eq!(pitches("Cmb6"), vec![0, 7, 3, 8]);
        assert_eq!(pitches("CM7#5"), vec![0, 4, 8, 11]);
        assert_eq!(pitches("C-"), vec![0, 7, 3]);
    }

    #[test]
    fn test_bass_note_moves_to_front() {
        assert_eq!(pitches("G7/B"), vec![11, 7, 2, 5]);
        assert_eq!(pitches("C/E"), vec![4, 0, 7]);
    }

    #[test]
    fn test_bass_note_outside_chord_is_added() {
        assert_eq!(pitches("Csus4/F"), vec![5, 0, 7]);
        assert_eq!(pitches("C/D"), vec![2, 0, 7, 4]);
    }

    #[test]
    fn test_flattened_fifth_with_bass() {
        assert_eq!(pitches("Cmaj7(b5)/E"), vec![4, 0, 11, 6]);
    }

    #[test]
    fn test_double_sharp_fifth() {
        assert_eq!(pitches("D(##5)"), vec![2, 6, 11]);
    }

    #[test]
    fn test_modifier_runs_sum() {
        // four flats and two sharps: net -2 on the third
        let mut got = pitches("C#(b#bb#b3)");
        got.sort();
        assert_eq!(got, vec![1, 3, 8]);
    }

    #[test]
    fn test_cancelling_modifiers_are_skipped() {
        assert_eq!(pitches("C(b#5)"), vec![0, 7, 4]);
        // the degree is never looked up when the shift is zero
        assert_eq!(pitches("C(#b8)"), vec![0, 7, 4]);
    }

    #[test]
    fn test_alterations_apply_in_order() {
        assert_eq!(pitches("C7(b9)"), vec![0, 7, 10, 4, 1]);
        assert_eq!(pitches("C(#11)"), vec![0, 7, 4, 6]);
        // b5 works from the table pair, so it adds a flat fifth next to the raised one
        assert_eq!(pitches("C(#5b5)"), vec![0, 4, 8, 6]);
        assert_eq!(pitches("C(b3#3)"), vec![0, 7, 4]);
    }

    #[test]
    fn test_flattened_seventh_removes_major_seventh() {
        assert_eq!(pitches("Cmaj7(b7)"), vec![0, 7, 4, 10]);
    }

    #[test]
    fn test_invalid_structure() {
        for s in ["Hmaj7", "Dmin(b0)", "", "Cfoo", "C()", "C(b5", "C(5)", "C/H", "C/E7", "C(b5)x"] {
            assert!(
                matches!(interpret(s), Err(ChordError::InvalidChordStructure)),
                "{s:?} should be a structure error"
            );
        }
    }

    #[test]
    fn test_invalid_alteration_degree() {
        for s in ["C(b8)", "Cm7(#10)", "C(b5#15)", "C(b99999999999)"] {
            assert!(
                matches!(interpret(s), Err(ChordError::InvalidAlteration)),
                "{s:?} should be an alteration error"
            );
        }
    }

    #[test]
    fn test_interpret_is_repeatable() {
        for s in ["Cmaj7(b5)/E", "Dm7(b5)", "G13", "C#(b#bb#b3)"] {
            assert_eq!(interpret(s).unwrap(), interpret(s).unwrap());
        }
    }

    #[test]
    fn test_results_have_no_duplicates() {
        for s in ["C13/A", "Cm(#9)", "C7(#7)", "Cadd9/D", "Cdim7(b7)", "C5/G"] {
            let p = pitches(s);
            for (i, x) in p.iter().enumerate() {
                assert!(!p[i + 1..].contains(x), "{s} repeats {x}");
            }
        }
    }
}
