//! SVG chord diagrams on a 20px grid.
//!
//! Strings are vertical lines and frets horizontal ones. Pressed frets are
//! filled circles, muted strings get a cross above the grid. The title goes
//! above the grid when `top` is set, otherwise below it.

use crate::diagram::{drawing_order, Layout};
use crate::settings::Graphics;
use crate::types::{Fret, MUTED};

const CELL: i32 = 20;
const DOT_RADIUS: i32 = 5;
const TITLE_SPACE: i32 = 10;

/// Draw `frets` as a standalone SVG document.
///
/// ```
/// use chordshape::settings::Graphics;
/// use chordshape::svg::render_svg;
///
/// let svg = render_svg(&[2, 0, 0, 0], "Am", &Graphics::default(), false);
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains(">Am</text>"));
/// ```
pub fn render_svg(frets: &[Fret], title: &str, graphics: &Graphics, left: bool) -> String {
    let frets = drawing_order(frets, left);
    let layout = Layout::for_frets(&frets, graphics.height);
    let n = frets.len() as i32;
    let h = layout.rows() as i32;
    let b = if graphics.top { TITLE_SPACE } else { 0 };

    let width = (n + 1) * CELL;
    let height = (h + 2) * CELL + b;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = width,
        h = height
    ));
    svg.push_str(&format!(
        "  <rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
        width, height
    ));
    svg.push_str("  <g stroke=\"black\" font-family=\"monospace\" font-size=\"10\">\n");

    if layout.header {
        svg.push_str(&line(CELL, CELL - 1 + b, n * CELL, CELL - 1 + b, 3));
    } else {
        let label = layout.lo.to_string();
        svg.push_str(&text(12 - 5 * label.len() as i32, 25 + b, &label));
    }

    for i in 0..n {
        let x = (i + 1) * CELL;
        svg.push_str(&line(x, CELL + b, x, (h + 1) * CELL + b, 1));
    }
    for i in 0..=h {
        let y = (i + 1) * CELL + b;
        svg.push_str(&line(CELL, y, n * CELL, y, 1));
    }

    if !title.is_empty() {
        let ty = if graphics.top { 3 } else { (h + 1) * CELL + 3 + b };
        svg.push_str(&text(CELL, ty, title));
    }

    for (string, &fret) in frets.iter().enumerate() {
        let xc = (string as i32 + 1) * CELL;
        if fret == MUTED {
            let yc = 11 + b;
            svg.push_str(&line(xc - 4, yc - 4, xc + 3, yc + 3, 2));
            svg.push_str(&line(xc - 3, yc + 3, xc + 4, yc - 4, 2));
        } else if fret > 0 {
            let row = if layout.header { fret } else { fret - layout.lo + 1 };
            svg.push_str(&format!(
                "    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"black\" stroke=\"none\"/>\n",
                xc,
                row * CELL + 10 + b,
                DOT_RADIUS
            ));
        }
    }

    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");
    svg
}

fn line(x1: i32, y1: i32, x2: i32, y2: i32, width: i32) -> String {
    format!(
        "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke-width=\"{}\"/>\n",
        x1, y1, x2, y2, width
    )
}

fn text(x: i32, y: i32, content: &str) -> String {
    format!(
        "    <text x=\"{}\" y=\"{}\" dominant-baseline=\"hanging\" stroke=\"none\">{}</text>\n",
        x,
        y,
        escape_xml(content)
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
