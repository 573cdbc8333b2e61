//! Request strings as typed by the user.
//!
//! ```text
//! request = body ("@" floor)? (":" position)?
//! body    = chord name | "CUSTOM" notes
//! ```
//!
//! `Cmaj7:2` asks for the second best voicing, `Am@7` for the best one with
//! nothing pressed below fret 7, and `CUSTOM C E G Bb` for a chord given note
//! by note.

use crate::custom::interpret_custom;
use crate::error::ChordError;
use crate::interpret::interpret;
use crate::types::{Chord, Fret};

const CUSTOM_PREFIX: &str = "CUSTOM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordInput {
    /// A chord name such as `G7/B`.
    Named(String),
    /// Note-by-note input, without the `CUSTOM` prefix.
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub input: ChordInput,
    /// 1-based list position.
    pub index: usize,
    pub min_fret: Option<Fret>,
    /// Diagram caption. Custom chords are marked with a leading `!`.
    pub title: String,
    /// Name used when the diagram is saved to a library.
    pub filename: String,
}

impl Request {
    /// Interpret the chord part of the request.
    pub fn chord(&self) -> Result<Chord, ChordError> {
        match &self.input {
            ChordInput::Named(name) => interpret(name),
            ChordInput::Custom(notes) => interpret_custom(notes),
        }
    }
}

/// Split a request into its chord, list position and fret floor.
///
/// ```
/// use chordshape::request::{parse_request, ChordInput};
///
/// let req = parse_request("Am@7:3").unwrap();
/// assert_eq!(req.input, ChordInput::Named("Am".to_string()));
/// assert_eq!(req.index, 3);
/// assert_eq!(req.min_fret, Some(7));
/// ```
pub fn parse_request(raw: &str) -> Result<Request, ChordError> {
    let (body, index) = match raw.split_once(':') {
        Some((body, position)) => {
            if position.contains(':') {
                return Err(ChordError::InvalidRequest(
                    "only one ':' is allowed".to_string(),
                ));
            }
            (body, parse_position(position)?)
        }
        None => (raw, 1),
    };

    let (chord_text, min_fret) = match body.rsplit_once('@') {
        Some((chord_text, floor)) => (chord_text, Some(parse_floor(floor)?)),
        None => (body, None),
    };

    let is_custom = chord_text
        .get(..CUSTOM_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(CUSTOM_PREFIX));
    let (input, title) = if is_custom {
        let notes = &chord_text[CUSTOM_PREFIX.len()..];
        (
            ChordInput::Custom(notes.to_string()),
            format!("!{}", notes.trim()),
        )
    } else {
        (ChordInput::Named(chord_text.to_string()), chord_text.to_string())
    };

    Ok(Request {
        input,
        index,
        min_fret,
        title,
        filename: body.to_string(),
    })
}

fn parse_position(text: &str) -> Result<usize, ChordError> {
    match text.trim().parse::<usize>() {
        Ok(0) => Err(ChordError::InvalidRequest(
            "list positions start at 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(ChordError::InvalidRequest(format!(
            "list position {:?} is not a whole number",
            text
        ))),
    }
}

fn parse_floor(text: &str) -> Result<Fret, ChordError> {
    text.trim()
        .parse::<Fret>()
        .ok()
        .filter(|&f| f >= 0)
        .ok_or_else(|| ChordError::InvalidRequest(format!("fret floor {:?} is not a fret number", text)))
}
