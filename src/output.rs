//! Rendering a voicing in the configured format and delivering it.

use crate::diagram::render_text;
use crate::error::ChordError;
use crate::settings::{OutputFormat, OutputMethod, SaveMethod, Settings};
use crate::svg::render_svg;
use crate::types::Fret;
use std::io::Write;
use std::path::PathBuf;

const FILE_PREFIX: &str = "chordshape";

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Draw `frets` in the configured output format.
pub fn render(frets: &[Fret], title: &str, settings: &Settings) -> Result<String, ChordError> {
    match settings.output_format {
        OutputFormat::Text => render_text(frets, &settings.graphics, settings.left),
        OutputFormat::Svg => Ok(render_svg(frets, title, &settings.graphics, settings.left)),
    }
}

/// Where a diagram for request `name` would be saved, if saving is enabled.
///
/// ```
/// use chordshape::output::save_path;
/// use chordshape::settings::{SaveMethod, Settings};
///
/// let mut settings = Settings::default();
/// assert_eq!(save_path(&settings, "G7/B"), None);
///
/// settings.save_method = SaveMethod::Library;
/// let path = save_path(&settings, "G7/B").unwrap();
/// assert!(path.ends_with("chordshape-G7_B.txt"));
/// ```
pub fn save_path(settings: &Settings, name: &str) -> Option<PathBuf> {
    let ext = settings.output_format.extension();
    let file = match settings.save_method {
        SaveMethod::Single => format!("{}-temp.{}", FILE_PREFIX, ext),
        SaveMethod::Library => format!("{}-{}.{}", FILE_PREFIX, file_safe(name), ext),
        SaveMethod::None => return None,
    };
    Some(settings.save_loc.join(file))
}

/// Print and/or save a rendered diagram according to `settings`.
///
/// Returns the path written to, if any.
pub fn deliver(
    content: &str,
    name: &str,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<Option<PathBuf>, ChordError> {
    if settings.output_method == OutputMethod::Print {
        writeln!(out, "{}", content)?;
    }

    let Some(path) = save_path(settings, name) else {
        return Ok(None);
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, content)?;
    log::debug!("saved diagram to {}", path.display());
    Ok(Some(path))
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c => c,
        })
        .collect()
}
