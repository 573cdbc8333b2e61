//! Integration tests for chordshape
//!
//! Tests the full pipeline from request string to voicing and diagram.

use chordshape::search::mutes_contiguous;
use chordshape::settings::{OutputFormat, SaveMethod};
use chordshape::{
    best_voicings, diagram, find, interpret, output, voice, Chord, ChordError, Instrument,
    SearchOptions, Settings, Weights,
};

fn preset(name: &str) -> Settings {
    let mut settings = Settings::default();
    settings.set_instrument_preset(name).unwrap();
    settings.set_ranking_preset(name).unwrap();
    settings
}

fn frets(request: &str, settings: &Settings) -> Vec<i32> {
    voice(request, settings).unwrap().result.selected.frets
}

#[test]
fn test_ukulele_c_major() {
    assert_eq!(frets("C", &Settings::default()), vec![0, 0, 0, 3]);
}

#[test]
fn test_ukulele_a_minor() {
    assert_eq!(frets("Am", &Settings::default()), vec![2, 0, 0, 0]);
}

#[test]
fn test_ukulele_common_chords() {
    let settings = Settings::default();
    let cases = [
        ("G7", vec![0, 2, 1, 2], 30),
        ("F", vec![2, 0, 1, 0], 65),
        ("Dm7", vec![5, 5, 5, 5], 38),
        ("E7", vec![1, 2, 0, 2], 30),
        ("Bb", vec![3, 2, 1, 1], 36),
        ("Cmaj7(b5)/E", vec![4, 4, 2, 3], 38),
        ("G/B", vec![0, 2, 3, 2], 48),
        ("Asus4", vec![2, 2, 0, 0], 65),
    ];
    for (name, expected, count) in cases {
        let voiced = voice(name, &settings).unwrap();
        assert_eq!(voiced.result.selected.frets, expected, "{name}");
        assert_eq!(voiced.result.valid_count, count, "{name}");
    }
}

#[test]
fn test_guitar_chords() {
    let settings = preset("GUITAR");
    let cases = [
        ("C", vec![-1, 3, 2, 0, 1, 0], 13939),
        ("G", vec![3, 2, 0, 0, 0, 3], 16754),
        ("Am", vec![-1, 0, 2, 2, 1, 0], 16561),
        ("E", vec![0, 2, 2, 1, 0, 0], 19512),
        ("D", vec![-1, -1, 0, 2, 3, 2], 16754),
        ("Cm", vec![-1, 3, 1, 0, 1, 3], 9328),
    ];
    for (name, expected, count) in cases {
        let voiced = voice(name, &settings).unwrap();
        assert_eq!(voiced.result.selected.frets, expected, "{name}");
        assert_eq!(voiced.result.valid_count, count, "{name}");
    }
}

#[test]
fn test_banjo_chords() {
    let settings = preset("BANJO");
    assert_eq!(frets("G", &settings), vec![-1, 0, 0, 0, 0]);
    assert_eq!(frets("C", &settings), vec![5, 2, 0, 1, 2]);
    assert_eq!(frets("D7", &settings), vec![-1, 0, 2, 1, 0]);
}

#[test]
fn test_list_position_degrades_to_worst() {
    let settings = Settings::default();
    assert_eq!(frets("C:3", &settings), vec![0, 4, 3, 3]);
    assert_eq!(frets("C:91", &settings), vec![0, 12, 3, 7]);
    assert_eq!(frets("C:500", &settings), frets("C:90", &settings));
}

#[test]
fn test_fret_floor_request() {
    let settings = Settings::default();
    assert_eq!(frets("C@5", &settings), vec![0, 0, 0, 7]);
    assert_eq!(frets("Am@7", &settings), vec![9, 9, 8, 7]);
}

#[test]
fn test_custom_request() {
    let settings = Settings::default();
    let voiced = voice("CUSTOM A C E", &settings).unwrap();
    assert_eq!(voiced.chord.pitches(), &[9, 0, 4]);
    assert_eq!(voiced.result.selected.frets, vec![2, 0, 0, 0]);
    assert_eq!(voiced.request.title, "!A C E");
}

#[test]
fn test_invalid_chord_names() {
    for request in ["Hmaj7", "Dmin(b0)", ""] {
        assert!(
            matches!(voice(request, &Settings::default()), Err(ChordError::InvalidChordStructure)),
            "{request:?}"
        );
    }
    assert!(matches!(
        voice("C(b8)", &Settings::default()),
        Err(ChordError::InvalidAlteration)
    ));
}

#[test]
fn test_too_few_frets() {
    let c = Chord::new([0, 4, 7]).unwrap();
    let weights = Weights::preset("UKULELE").unwrap();

    // the A string reaches only A, Bb and B
    let short = Instrument::new(vec![7, 0, 4, 9], 2).with_order(vec![2, 0, 1, 3]);
    let err = find(&c, &short, &weights, &SearchOptions::default()).unwrap_err();
    assert!(matches!(err, ChordError::NoValidPositions));
    assert_eq!(err.reason(), "no-positions");

    // muting rescues the A string, but then the mutes are not contiguous
    let muted = short.with_mutable(4);
    let err = find(&c, &muted, &weights, &SearchOptions::default()).unwrap_err();
    assert!(matches!(err, ChordError::NoSolutionsFound));
}

#[test]
fn test_three_frets_single_voicing() {
    let uke = Instrument::new(vec![7, 0, 4, 9], 3);
    let c = interpret("C").unwrap();
    let result = find(&c, &uke, &Weights::preset("UKULELE").unwrap(), &SearchOptions::default()).unwrap();
    assert_eq!(result.valid_count, 1);
    assert_eq!(result.selected.frets, vec![0, 0, 0, 3]);
}

#[test]
fn test_guitar_mutes_stay_contiguous() {
    let settings = preset("GUITAR");
    for name in ["C", "D", "F", "Bm7"] {
        for ranked in best_voicings(name, &settings, 50).unwrap() {
            assert!(mutes_contiguous(&ranked.voicing.frets), "{name}: {}", ranked.voicing);
        }
    }
}

#[test]
fn test_settings_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.yml");
    let diagrams = dir.path().join("diagrams");
    std::fs::write(
        &config,
        format!(
            "instrument-preset: GUITAR\nranking-preset: GUITAR\noutput-format: SVG\noutput-method: NONE\nsave-method: LIBRARY\nsave-loc: {}\n",
            diagrams.display()
        ),
    )
    .unwrap();

    let settings = Settings::load(&config).unwrap();
    assert_eq!(settings.output_format, OutputFormat::Svg);
    assert_eq!(settings.save_method, SaveMethod::Library);

    let voiced = voice("G7/B", &settings).unwrap();
    let content = output::render(&voiced.result.selected.frets, &voiced.request.title, &settings).unwrap();
    let mut sink = Vec::new();
    let path = output::deliver(&content, &voiced.request.filename, &settings, &mut sink)
        .unwrap()
        .unwrap();
    assert!(sink.is_empty());
    assert_eq!(path, diagrams.join("chordshape-G7_B.svg"));
    let saved = std::fs::read_to_string(path).unwrap();
    assert!(saved.contains(">G7/B</text>"));
}

#[test]
fn test_text_diagram_for_left_handed_guitar() {
    let mut settings = preset("GUITAR");
    settings.set_instrument_preset("GUITAR-L").unwrap();
    let text = diagram("C", &settings).unwrap();
    // x 3 2 0 1 0 mirrored
    assert_eq!(text.lines().next(), Some("             x "));
    assert_eq!(text.lines().nth(2), Some("   | O | | | | "));
}
