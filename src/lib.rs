//! Chord voicings for fretted string instruments.
//!
//! A chord name such as `Cmaj7(b5)/E` is interpreted as pitch classes, every
//! playable fretting of those notes on the instrument is enumerated, and the
//! voicings are ranked by a weighted set of playability heuristics.

pub mod api;
pub mod custom;
pub mod diagram;
pub mod error;
pub mod instrument;
pub mod interpret;
pub mod output;
pub mod rank;
pub mod request;
pub mod search;
pub mod settings;
pub mod svg;
pub mod tables;
pub mod types;

pub use api::{best_voicings, diagram, voice, Voiced};
pub use custom::interpret_custom;
pub use error::ChordError;
pub use instrument::{Instrument, InstrumentPreset};
pub use interpret::interpret;
pub use rank::{rank, Heuristic, Weights};
pub use search::{find, SearchOptions, SearchResult};
pub use settings::Settings;
pub use types::{Chord, Fret, PitchClass, RankedVoicing, Voicing, MUTED};
