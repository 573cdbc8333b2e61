//! # Public API
//!
//! End-to-end entry points: request string in, voicing or diagram out.
//!
//! - [`voice()`] - interpret a request and find the voicing it asks for
//! - [`diagram()`] - the same, rendered in the configured output format
//! - [`best_voicings()`] - the best few voicings, best first
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordshape::{voice, Settings};
//!
//! let settings = Settings::default(); // soprano ukulele
//! let voiced = voice("C", &settings)?;
//! assert_eq!(voiced.result.selected.frets, vec![0, 0, 0, 3]);
//! # Ok::<(), chordshape::ChordError>(())
//! ```
//!
//! ## Other Instruments
//!
//! ```rust
//! use chordshape::{voice, Settings};
//!
//! let mut settings = Settings::default();
//! settings.set_instrument_preset("GUITAR")?;
//! settings.set_ranking_preset("GUITAR")?;
//! let voiced = voice("C", &settings)?;
//! assert_eq!(voiced.result.selected.to_string(), "x 3 2 0 1 0");
//! # Ok::<(), chordshape::ChordError>(())
//! ```

use crate::output::render;
use crate::request::{parse_request, Request};
use crate::search::{find, SearchOptions, SearchResult};
use crate::settings::Settings;
use crate::types::{Chord, RankedVoicing};
use crate::ChordError;

/// A request together with its chord and search outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Voiced {
    pub request: Request,
    pub chord: Chord,
    pub result: SearchResult,
}

/// Interpret `request` and find the voicing at its list position.
///
/// # Pipeline
/// 1. Split off the `:N` list position and `@N` fret floor
/// 2. Interpret the chord name (or `CUSTOM` note list)
/// 3. Search the instrument for valid voicings and rank them
///
/// # Errors
/// Any [`ChordError`] raised along the way; there are no partial results.
pub fn voice(request: &str, settings: &Settings) -> Result<Voiced, ChordError> {
    let request = parse_request(request)?;
    let chord = request.chord()?;
    let options = SearchOptions {
        important: settings.important,
        index: request.index,
        min_fret: request.min_fret,
        ..SearchOptions::default()
    };
    let result = find(&chord, &settings.instrument, &settings.weights, &options)?;
    log::debug!(
        "{:?}: {} at position {} of {}",
        request.title,
        result.selected,
        request.index,
        result.valid_count
    );
    Ok(Voiced {
        request,
        chord,
        result,
    })
}

/// Interpret `request` and render its voicing as a diagram.
///
/// ```rust
/// use chordshape::{diagram, Settings};
///
/// let text = diagram("Am", &Settings::default())?;
/// assert_eq!(text.lines().nth(3), Some("   O | | | "));
/// # Ok::<(), chordshape::ChordError>(())
/// ```
pub fn diagram(request: &str, settings: &Settings) -> Result<String, ChordError> {
    let voiced = voice(request, settings)?;
    render(&voiced.result.selected.frets, &voiced.request.title, settings)
}

/// Up to `count` best voicings for `request`, best first.
///
/// The list position in the request is ignored.
pub fn best_voicings(
    request: &str,
    settings: &Settings,
    count: usize,
) -> Result<Vec<RankedVoicing>, ChordError> {
    let request = parse_request(request)?;
    let chord = request.chord()?;
    let options = SearchOptions {
        important: settings.important,
        index: count.max(1),
        min_fret: request.min_fret,
        ..SearchOptions::default()
    };
    Ok(find(&chord, &settings.instrument, &settings.weights, &options)?.shortlist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_uses_list_position() {
        let voiced = voice("C:2", &Settings::default()).unwrap();
        assert_eq!(voiced.result.selected.frets, vec![0, 4, 0, 3]);
        assert_eq!(voiced.request.index, 2);
    }

    #[test]
    fn test_best_voicings_in_order() {
        let list = best_voicings("C:7", &Settings::default(), 3).unwrap();
        let frets: Vec<_> = list.iter().map(|r| r.voicing.frets.clone()).collect();
        assert_eq!(frets, vec![vec![0, 0, 0, 3], vec![0, 4, 0, 3], vec![0, 4, 3, 3]]);
    }

    #[test]
    fn test_diagram_svg() {
        let settings = Settings::from_yaml_str("output-format: SVG").unwrap();
        let svg = diagram("G7/B", &settings).unwrap();
        assert!(svg.contains(">G7/B</text>"));
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(
            voice("Hmaj7", &Settings::default()),
            Err(ChordError::InvalidChordStructure)
        ));
        assert!(matches!(
            voice("C:0", &Settings::default()),
            Err(ChordError::InvalidRequest(_))
        ));
    }
}
