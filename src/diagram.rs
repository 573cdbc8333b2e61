//! Text chord diagrams.
//!
//! ```text
//!
//!    =======
//!    | | | |
//!    | | | |
//!    | | | O
//!    | | | |
//!    | | | |
//! ```
//!
//! The top line carries mute marks. Voicings near the nut get a header row;
//! voicings higher up the neck print their lowest pressed fret in the margin
//! instead.

use crate::error::ChordError;
use crate::settings::Graphics;
use crate::types::{Fret, MUTED};

/// Which frets a diagram shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Draw the nut; otherwise the first row is labelled with its fret number.
    pub header: bool,
    /// First fret row.
    pub lo: Fret,
    /// Last fret row.
    pub hi: Fret,
}

impl Layout {
    /// Rows needed for `frets` with at least `height` rows.
    ///
    /// Heights beyond the fret range saturate instead of overflowing.
    pub fn for_frets(frets: &[Fret], height: usize) -> Layout {
        let highest = frets.iter().copied().max().unwrap_or(0);
        let lowest_pressed = frets.iter().copied().filter(|&f| f > 0).min();
        let (header, lo) = match lowest_pressed {
            Some(low) if highest > 5 && low >= 3 => (false, low),
            _ => (true, 1),
        };
        Layout {
            header,
            lo,
            hi: lo
                .saturating_add(Fret::try_from(height).unwrap_or(Fret::MAX))
                .saturating_sub(1)
                .max(highest),
        }
    }

    pub fn rows(&self) -> usize {
        (self.hi - self.lo + 1) as usize
    }
}

/// Frets in drawing order, mirrored for left-handed players.
pub(crate) fn drawing_order(frets: &[Fret], left: bool) -> Vec<Fret> {
    let mut frets = frets.to_vec();
    if left {
        frets.reverse();
    }
    frets
}

/// Draw `frets` as a text diagram.
///
/// ```
/// use chordshape::diagram::render_text;
/// use chordshape::settings::Graphics;
///
/// let text = render_text(&[0, 0, 0, 3], &Graphics::default(), false).unwrap();
/// assert_eq!(text.lines().nth(1), Some("   ======="));
/// assert_eq!(text.lines().nth(4), Some("   | | | O "));
/// ```
///
/// # Errors
/// [`ChordError::Render`] when the starting fret number does not fit in the margin.
pub fn render_text(frets: &[Fret], graphics: &Graphics, left: bool) -> Result<String, ChordError> {
    let frets = drawing_order(frets, left);
    let layout = Layout::for_frets(&frets, graphics.height);
    let margin = " ".repeat(graphics.margin);

    let mut out = margin.clone();
    for &f in &frets {
        if f == MUTED {
            out.push_str(&graphics.muted);
            out.push(' ');
        } else {
            out.push_str("  ");
        }
    }

    if layout.header {
        out.push('\n');
        out.push_str(&margin);
        out.push_str(&graphics.head.repeat((2 * frets.len()).saturating_sub(1)));
    }

    for line in layout.lo..=layout.hi {
        out.push('\n');
        if line == layout.lo && !layout.header {
            let num = layout.lo.to_string();
            if num.len() >= graphics.margin {
                return Err(ChordError::Render(format!(
                    "fret number {} does not fit in a margin of {}",
                    num, graphics.margin
                )));
            }
            out.push_str(&" ".repeat(graphics.margin - num.len() - 1));
            out.push_str(&num);
            out.push(' ');
        } else {
            out.push_str(&margin);
        }

        for &f in &frets {
            out.push_str(if f == line { &graphics.press } else { &graphics.string });
            out.push(' ');
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_position_has_header() {
        let text = render_text(&[0, 0, 0, 3], &Graphics::default(), false).unwrap();
        let expected = [
            "           ",
            "   =======",
            "   | | | | ",
            "   | | | | ",
            "   | | | O ",
            "   | | | | ",
            "   | | | | ",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_high_position_labels_first_fret() {
        let text = render_text(&[7, 7, 7, 7], &Graphics::default(), false).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], " 7 O O O O ");
        assert_eq!(lines[2], "   | | | | ");
    }

    #[test]
    fn test_mutes_on_top_line() {
        let text = render_text(&[-1, 3, 2, 0, 1, 0], &Graphics::default(), false).unwrap();
        assert_eq!(text.lines().next(), Some("   x           "));
        assert_eq!(text.lines().nth(1), Some("   ==========="));
    }

    #[test]
    fn test_left_handed_mirror() {
        let text = render_text(&[0, 0, 0, 3], &Graphics::default(), true).unwrap();
        assert_eq!(text.lines().nth(4), Some("   O | | | "));
    }

    #[test]
    fn test_stretch_extends_height() {
        let layout = Layout::for_frets(&[1, 0, 0, 8], 5);
        assert!(layout.header);
        assert_eq!((layout.lo, layout.hi), (1, 8));
        assert_eq!(layout.rows(), 8);
    }

    #[test]
    fn test_huge_height_does_not_overflow() {
        let layout = Layout::for_frets(&[0, 0, 0, 3], i32::MAX as usize);
        assert_eq!((layout.lo, layout.hi), (1, Fret::MAX - 1));
        let layout = Layout::for_frets(&[7, 7, 7, 7], usize::MAX);
        assert_eq!(layout.hi, Fret::MAX - 1);
    }

    #[test]
    fn test_margin_too_narrow() {
        let graphics = Graphics {
            margin: 2,
            ..Graphics::default()
        };
        assert!(render_text(&[7, 7, 7, 7], &graphics, false).is_ok());
        let err = render_text(&[10, 10, 10, 12], &graphics, false).unwrap_err();
        assert!(matches!(err, ChordError::Render(_)));
    }

    #[test]
    fn test_custom_symbols() {
        let graphics = Graphics {
            head: "#".to_string(),
            press: "*".to_string(),
            string: ":".to_string(),
            ..Graphics::default()
        };
        let text = render_text(&[2, 0, 0, 0], &graphics, false).unwrap();
        assert_eq!(text.lines().nth(1), Some("   #######"));
        assert_eq!(text.lines().nth(3), Some("   * : : : "));
    }
}
