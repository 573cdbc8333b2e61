//! # Error Types
//!
//! This module defines the single error type returned by every stage of the
//! chordshape pipeline.
//!
//! Each variant is a reason code. The message is meant to be shown to the user
//! as-is; there is no recovery or retry inside the library.
//!
//! ## Error Types
//! - `InvalidChordStructure` - the chord name does not fit `<root><quality><alterations><bass>`
//! - `InvalidAlteration` - an alteration names a degree that cannot be altered
//! - `NoValidPositions` - some string cannot play any note of the chord
//! - `NoSolutionsFound` - the search finished without a playable voicing
//! - `CustomInputNotRecognized` - note-by-note input could not be read
//! - `InvalidRequest` / `InvalidInstrument` / `Settings` / `Render` / `Io` - surrounding layers
//!
//! ## Usage
//! ```rust
//! use chordshape::{interpret, ChordError};
//!
//! match interpret("Hmaj7") {
//!     Ok(chord) => println!("{:?}", chord),
//!     Err(ChordError::InvalidChordStructure) => eprintln!("not a chord name"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordError {
    /// The request does not match the chord grammar, or the quality is unknown.
    ///
    /// # Example
    /// ```
    /// # use chordshape::ChordError;
    /// let err = ChordError::InvalidChordStructure;
    /// assert!(err.to_string().starts_with("Invalid chord structure"));
    /// ```
    #[error(
        "Invalid chord structure: try a chord of the form \"WXYZ\", where:\n\
         - W is a letter A-G possibly followed by \"b\" or \"#\";\n\
         - (optional) X is a chord quality, e.g. \"m\", \"add9\", \"dim7\", ...;\n\
         - (optional) Y is a set of altered notes in parentheses, e.g. \"(b7)\" or \"(#7b13)\";\n\
         - (optional) Z is a bass note, e.g. \"/D#\"."
    )]
    InvalidChordStructure,

    /// An alteration refers to a degree outside 1, 2, 3, 4, 5, 6, 7, 9, 11, 13.
    #[error("Invalid alteration: you can alter the numbers 1, 2, 3, 4, 5, 6, 7, 9, 11, 13 only.")]
    InvalidAlteration,

    /// At least one string has no fret (or mute) producing a note of the chord.
    #[error("No valid positions: at least one string cannot play any note of this chord.")]
    NoValidPositions,

    /// The search completed without any voicing satisfying the constraints.
    #[error("No solutions found: this chord cannot be played with the current instrument settings.")]
    NoSolutionsFound,

    /// Note-by-note input contained no recognisable notes.
    #[error("Custom input not recognised: enter notes as letters (e.g. \"C Eb G\") or numbers 0-11.")]
    CustomInputNotRecognized,

    /// The request string around the chord name is malformed.
    ///
    /// # Example
    /// ```
    /// # use chordshape::ChordError;
    /// let err = ChordError::InvalidRequest("only one ':' is allowed".to_string());
    /// assert_eq!(err.to_string(), "Invalid request: only one ':' is allowed");
    /// ```
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The instrument geometry is inconsistent.
    #[error("Invalid instrument: {0}")]
    InvalidInstrument(String),

    /// The settings file could not be read or holds unsupported values.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// A diagram could not be drawn with the configured graphics.
    #[error("Cannot render diagram: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChordError {
    /// Short stable code for programmatic handling.
    ///
    /// ```
    /// # use chordshape::ChordError;
    /// assert_eq!(ChordError::NoSolutionsFound.reason(), "no-solutions");
    /// ```
    pub fn reason(&self) -> &'static str {
        match self {
            ChordError::InvalidChordStructure => "chord",
            ChordError::InvalidAlteration => "alteration",
            ChordError::NoValidPositions => "no-positions",
            ChordError::NoSolutionsFound => "no-solutions",
            ChordError::CustomInputNotRecognized => "custom",
            ChordError::InvalidRequest(_) => "request",
            ChordError::InvalidInstrument(_) => "instrument",
            ChordError::Settings(_) => "settings",
            ChordError::Render(_) => "render",
            ChordError::Io(_) => "io",
        }
    }
}
