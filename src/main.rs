use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::io::{self, Write};
use std::path::PathBuf;
use std::{env, process};

use chordshape::settings::{OutputFormat, OutputMethod};
use chordshape::{best_voicings, output, voice, ChordError, Settings};

/// Find the easiest voicing of a chord on a fretted instrument.
///
/// Requests look like `Cmaj7`, `G7/B:2` (second best), `Am@7` (nothing
/// pressed below fret 7) or `CUSTOM C E G Bb`.
///
/// Logging is controlled with RUST_LOG; if it is not set, only warnings are shown.
#[derive(Parser)]
#[command(version, about, verbatim_doc_comment)]
struct Cli {
    /// Chord request
    request: String,

    /// YAML settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Instrument preset, e.g. GUITAR or UKULELE-L
    #[arg(long, value_name = "PRESET")]
    instrument: Option<String>,

    /// Ranking preset, e.g. GUITAR
    #[arg(long, value_name = "PRESET")]
    ranking: Option<String>,

    /// Diagram format
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Print the N best voicings as fret lists instead of a diagram
    #[arg(long, value_name = "N")]
    list: Option<usize>,

    /// Do not print the diagram (it is still saved if saving is configured)
    #[arg(long)]
    no_print: bool,

    /// Show search details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Svg,
}

fn settings(cli: &Cli) -> Result<Settings, ChordError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(name) = &cli.instrument {
        settings.set_instrument_preset(name)?;
    }
    if let Some(name) = &cli.ranking {
        settings.set_ranking_preset(name)?;
    }
    if let Some(format) = cli.format {
        settings.output_format = match format {
            Format::Text => OutputFormat::Text,
            Format::Svg => OutputFormat::Svg,
        };
    }
    if cli.no_print {
        settings.output_method = OutputMethod::None;
    }
    Ok(settings)
}

fn run(cli: &Cli) -> Result<(), ChordError> {
    let settings = settings(cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(count) = cli.list {
        for (i, ranked) in best_voicings(&cli.request, &settings, count)?.iter().enumerate() {
            writeln!(out, "{:>3}  {}  ({})", i + 1, ranked.voicing, ranked.score)?;
        }
        return Ok(());
    }

    let voiced = voice(&cli.request, &settings)?;
    let content = output::render(&voiced.result.selected.frets, &voiced.request.title, &settings)?;
    if let Some(path) = output::deliver(&content, &voiced.request.filename, &settings, &mut out)? {
        eprintln!("Saved diagram to {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::builder();
    if cli.verbose {
        log_builder.filter_level(LevelFilter::Debug);
    } else if env::var("RUST_LOG").is_err() {
        log_builder.filter_level(LevelFilter::Warn);
    }
    log_builder.init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
