//! # Settings
//!
//! User settings are read from a YAML file. Every key is optional:
//!
//! ```yaml
//! instrument-preset: GUITAR-L      # "-L" draws diagrams left-handed
//! ranking-preset: GUITAR
//! output-format: SVG               # TEXT | SVG
//! output-method: NONE              # PRINT | NONE
//! save-method: LIBRARY             # SINGLE | LIBRARY | NONE
//! save-loc: diagrams/
//! height: 6
//! ```
//!
//! When `instrument-preset` is empty or unknown the instrument is built from
//! `tuning`, `nfrets`, `nmute`, `important`, `order`, `stringstarts` and
//! `left`. Likewise `ranks` is used when `ranking-preset` does not name a
//! preset. Tunings are given as real open-string pitches; strings that start
//! above fret 0 are converted to the imagined neck on load.

use crate::error::ChordError;
use crate::instrument::Instrument;
use crate::rank::Weights;
use crate::types::{Fret, PitchClass};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const LEFT_SUFFIX: &str = "-L";
/// Tallest diagram a settings file may ask for, in fret rows.
const MAX_HEIGHT: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Text,
    Svg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputMethod {
    #[default]
    Print,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SaveMethod {
    /// One file, overwritten by every request.
    Single,
    /// One file per request, named after it.
    Library,
    #[default]
    None,
}

/// Diagram drawing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graphics {
    /// Minimum number of fret rows.
    pub height: usize,
    /// Columns before the first string; must fit the starting fret number.
    pub margin: usize,
    pub head: String,
    pub string: String,
    pub press: String,
    pub muted: String,
    /// SVG only: put the title above the grid.
    pub top: bool,
}

impl Default for Graphics {
    fn default() -> Self {
        Self {
            height: 5,
            margin: 3,
            head: "=".to_string(),
            string: "|".to_string(),
            press: "O".to_string(),
            muted: "x".to_string(),
            top: true,
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub instrument: Instrument,
    /// How many chord notes must be sounded.
    pub important: usize,
    /// Mirror diagrams for left-handed players.
    pub left: bool,
    pub weights: Weights,
    pub output_format: OutputFormat,
    pub output_method: OutputMethod,
    pub save_method: SaveMethod,
    pub save_loc: PathBuf,
    pub graphics: Graphics,
}

/// Settings as written in the file, before presets are resolved.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSettings {
    instrument_preset: Option<String>,
    ranking_preset: Option<String>,
    tuning: Option<Vec<PitchClass>>,
    nfrets: Option<Fret>,
    nmute: Option<usize>,
    important: Option<usize>,
    order: Option<Vec<usize>>,
    stringstarts: Option<Vec<Fret>>,
    left: Option<bool>,
    ranks: Option<Weights>,
    output_format: Option<OutputFormat>,
    output_method: Option<OutputMethod>,
    save_method: Option<SaveMethod>,
    save_loc: Option<PathBuf>,
    height: Option<usize>,
    margin: Option<usize>,
    head: Option<String>,
    string: Option<String>,
    press: Option<String>,
    muted: Option<String>,
    top: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instrument: Instrument::new(vec![7, 0, 4, 9], 12).with_order(vec![2, 0, 1, 3]),
            important: 4,
            left: false,
            weights: Weights([1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            output_format: OutputFormat::default(),
            output_method: OutputMethod::default(),
            save_method: SaveMethod::default(),
            save_loc: PathBuf::from("diagrams/"),
            graphics: Graphics::default(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML text.
    ///
    /// ```
    /// use chordshape::settings::{OutputFormat, Settings};
    ///
    /// let s = Settings::from_yaml_str("instrument-preset: GUITAR-L\noutput-format: SVG\n").unwrap();
    /// assert_eq!(s.instrument.string_count(), 6);
    /// assert!(s.left);
    /// assert_eq!(s.output_format, OutputFormat::Svg);
    /// ```
    pub fn from_yaml_str(content: &str) -> Result<Self, ChordError> {
        let raw: RawSettings = if content.trim().is_empty() {
            RawSettings::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ChordError::Settings(e.to_string()))?
        };
        Self::resolve(raw)
    }

    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChordError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChordError::Settings(format!("cannot read {}: {}", path.display(), e)))?;
        log::debug!("loading settings from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Switch to a named instrument preset (with optional `-L` suffix).
    pub fn set_instrument_preset(&mut self, name: &str) -> Result<(), ChordError> {
        let (name, left) = split_left(name);
        let preset = Instrument::preset(name)
            .ok_or_else(|| ChordError::Settings(format!("unknown instrument preset {:?}", name)))?;
        self.instrument = preset.instrument;
        self.important = preset.important;
        self.left = left;
        if preset.tall {
            self.graphics.height = self.graphics.height.max(6);
        }
        Ok(())
    }

    /// Switch to a named ranking preset.
    pub fn set_ranking_preset(&mut self, name: &str) -> Result<(), ChordError> {
        self.weights = Weights::preset(name)
            .ok_or_else(|| ChordError::Settings(format!("unknown ranking preset {:?}", name)))?;
        Ok(())
    }

    fn resolve(raw: RawSettings) -> Result<Self, ChordError> {
        let defaults = Graphics::default();
        let mut settings = Settings {
            output_format: raw.output_format.unwrap_or_default(),
            output_method: raw.output_method.unwrap_or_default(),
            save_method: raw.save_method.unwrap_or_default(),
            save_loc: raw.save_loc.clone().unwrap_or_else(|| PathBuf::from("diagrams/")),
            graphics: Graphics {
                height: raw.height.unwrap_or(defaults.height),
                margin: raw.margin.unwrap_or(defaults.margin),
                head: raw.head.clone().unwrap_or(defaults.head),
                string: raw.string.clone().unwrap_or(defaults.string),
                press: raw.press.clone().unwrap_or(defaults.press),
                muted: raw.muted.clone().unwrap_or(defaults.muted),
                top: raw.top.unwrap_or(defaults.top),
            },
            ..Settings::default()
        };

        let preset_name = raw.instrument_preset.as_deref().unwrap_or("UKULELE");
        let (name, left_suffix) = split_left(preset_name);
        if Instrument::preset(name).is_some() {
            settings.set_instrument_preset(name)?;
            settings.left = left_suffix || raw.left.unwrap_or(false);
        } else {
            if !name.is_empty() {
                log::warn!("unknown instrument preset {:?}, using explicit instrument keys", name);
            }
            settings.apply_explicit_instrument(&raw)?;
            settings.left = left_suffix || raw.left.unwrap_or(false);
        }

        let ranking = raw.ranking_preset.as_deref().unwrap_or("UKULELE");
        match Weights::preset(ranking) {
            Some(weights) => settings.weights = weights,
            None => {
                if !ranking.is_empty() {
                    log::warn!("unknown ranking preset {:?}, using ranks", ranking);
                }
                if let Some(ranks) = raw.ranks {
                    settings.weights = ranks;
                }
            }
        }

        if settings.graphics.margin == 0 {
            return Err(ChordError::Settings("margin must be at least 1".to_string()));
        }
        if !(1..=MAX_HEIGHT).contains(&settings.graphics.height) {
            return Err(ChordError::Settings(format!(
                "height must be between 1 and {}, got {}",
                MAX_HEIGHT, settings.graphics.height
            )));
        }
        Ok(settings)
    }

    fn apply_explicit_instrument(&mut self, raw: &RawSettings) -> Result<(), ChordError> {
        let (open, default_order) = match &raw.tuning {
            Some(tuning) => (tuning.clone(), (0..tuning.len()).collect()),
            None => (vec![7, 0, 4, 9], vec![2, 0, 1, 3]),
        };
        let n = open.len();
        self.instrument = Instrument::from_open_strings(
            &open,
            raw.nfrets.unwrap_or(12),
            raw.nmute.unwrap_or(0),
            raw.order.clone().unwrap_or(default_order),
            raw.stringstarts.clone().unwrap_or_else(|| vec![0; n]),
        )?;
        self.important = raw.important.unwrap_or(n);
        Ok(())
    }
}

fn split_left(name: &str) -> (&str, bool) {
    match name.strip_suffix(LEFT_SUFFIX) {
        Some(stripped) => (stripped, true),
        None => (name, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let s = Settings::from_yaml_str("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.instrument, Instrument::preset("UKULELE").unwrap().instrument);
    }

    #[test]
    fn test_left_handed_suffix() {
        let s = Settings::from_yaml_str("instrument-preset: UKULELE-L").unwrap();
        assert!(s.left);
        assert_eq!(s.instrument.tuning, vec![7, 0, 4, 9]);
    }

    #[test]
    fn test_banjo_needs_taller_diagram() {
        let s = Settings::from_yaml_str("instrument-preset: BANJO\nranking-preset: BANJO").unwrap();
        assert_eq!(s.graphics.height, 6);
        assert_eq!(s.important, 3);
        assert_eq!(s.weights, Weights::preset("BANJO").unwrap());
    }

    #[test]
    fn test_explicit_instrument_keys() {
        let yaml = "\
instrument-preset: ''
tuning: [7, 2, 7, 11, 2]
nfrets: 15
nmute: 1
important: 3
order: [4, 0, 1, 2, 3]
stringstarts: [5, 0, 0, 0, 0]
ranking-preset: ''
ranks: [2, 1, 3, 0, 1, 0, 3, 2, 1]
";
        let s = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(s.instrument, Instrument::preset("BANJO").unwrap().instrument);
        assert_eq!(s.important, 3);
        assert_eq!(s.weights.0[6], 3.0);
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let s = Settings::from_yaml_str("instrument-preset: MANDOLIN\ntuning: [7, 2, 9, 4]").unwrap();
        assert_eq!(s.instrument.tuning, vec![7, 2, 9, 4]);
        assert_eq!(s.instrument.order, vec![0, 1, 2, 3]);
        assert_eq!(s.important, 4);
    }

    #[test]
    fn test_output_options() {
        let yaml = "output-format: SVG\noutput-method: NONE\nsave-method: LIBRARY\nsave-loc: out/";
        let s = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(s.output_format, OutputFormat::Svg);
        assert_eq!(s.output_method, OutputMethod::None);
        assert_eq!(s.save_method, SaveMethod::Library);
        assert_eq!(s.save_loc, PathBuf::from("out/"));
    }

    #[test]
    fn test_invalid_values() {
        for yaml in [
            "output-format: PNG",
            "save-method: sometimes",
            "nfrets: lots",
            "colour: blue",
            "margin: 0",
            "height: 0",
            "height: 2147483647",
            "instrument-preset: ''\ntuning: [7, 0, 4]\norder: [0, 1]",
        ] {
            assert!(
                Settings::from_yaml_str(yaml).is_err(),
                "{yaml:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_set_presets() {
        let mut s = Settings::default();
        s.set_instrument_preset("GUITAR-L").unwrap();
        s.set_ranking_preset("GUITAR").unwrap();
        assert!(s.left);
        assert_eq!(s.instrument.mutable, 2);
        assert!(s.set_instrument_preset("KAZOO").is_err());
        assert!(s.set_ranking_preset("KAZOO").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        std::fs::write(&path, "instrument-preset: SAZ\n").unwrap();
        let s = Settings::load(&path).unwrap();
        assert_eq!(s.instrument.string_count(), 3);
        assert!(matches!(
            Settings::load(dir.path().join("missing.yml")),
            Err(ChordError::Settings(_))
        ));
    }
}
