//! Integration tests for chordshift
//!
//! Tests full chord-sheet rewrites through the public API.

use chordshift::lexer::{Lexer, Segment};
use chordshift::{
    calculate_offset, is_valid_key, retune_sheet, transpose_chord, transpose_chord_sheet, Key,
    SheetHeader,
};

const SHEET: &str = r#"# Amazing Grace
Key: G (AG:G)   Capo: 0

[Verse 1]
G           G7        C      G
Amazing grace, how sweet the sound
G                  Em/B     D
That saved a wretch like me

[Bridge]
Cmaj7  D/F#  Em7  Am7  Bm7b5  Eb7
"#;

fn chords_only(sheet: &str) -> Vec<String> {
    sheet
        .lines()
        .filter(|line| !line.contains("Key:"))
        .flat_map(|line| Lexer::new(line).tokenize())
        .filter_map(|segment| match segment {
            Segment::Chord(span) => Some(span.text.to_string()),
            Segment::Text(_) => None,
        })
        .collect()
}

#[test]
fn test_full_sheet_up_a_whole_step() {
    let result = transpose_chord_sheet(SHEET, "G", "A", 0);
    assert_eq!(
        result,
        r#"# Amazing Grace
Key: G (AG:G)   Capo: 0

[Verse 1]
A           A7        D      A
Amazing grace, how sweet the sound
A                  F#m/C#     E
That saved a wretch like me

[Bridge]
Dmaj7  E/G#  F#m7  Bm7  C#m7b5  F7
"#
    );
}

#[test]
fn test_identity_for_every_key() {
    for key in Key::all() {
        let key = key.to_string();
        assert_eq!(transpose_chord_sheet(SHEET, &key, &key, 0), SHEET);
    }
}

#[test]
fn test_round_trip_through_every_key() {
    for key in Key::all() {
        let key = key.to_string();
        let there = transpose_chord_sheet(SHEET, "G", &key, 0);
        let back = transpose_chord_sheet(&there, &key, "G", 0);
        assert_eq!(back, SHEET, "via {}", key);
    }
}

#[test]
fn test_only_chord_spans_change() {
    let result = transpose_chord_sheet(SHEET, "G", "C#", 0);
    let original: Vec<&str> = SHEET.lines().collect();
    let rewritten: Vec<&str> = result.lines().collect();
    assert_eq!(original.len(), rewritten.len());

    // Lyric and markup lines come through byte-identical
    for (before, after) in original.iter().zip(&rewritten) {
        if chords_only(before).is_empty() {
            assert_eq!(before, after);
        }
    }
    assert_eq!(chords_only(&result).len(), chords_only(SHEET).len());
}

#[test]
fn test_no_double_accidentals_anywhere() {
    for target in Key::all() {
        for capo in 0..12 {
            let result = transpose_chord_sheet(SHEET, "G", &target.to_string(), capo);
            for word in chords_only(&result) {
                assert!(!word.contains("##") && !word.contains("#b"), "{}", word);
            }
        }
    }
}

#[test]
fn test_capo_retune_scenarios() {
    // Capo 7 -> 5 while the sound stays in D
    let sheet = "Key: D (AG:G)   Capo: 7\n\n[Verse]\n   G          Em";
    assert_eq!(
        retune_sheet(sheet, "G", "D", 5),
        "Key: D (AG:A)   Capo: 5\n\n[Verse]\n   A          F#m"
    );

    // Dropping the capo plays the sounding key directly
    let sheet = "Key: G (AG:D)   Capo: 5\nD  A  Bm";
    assert_eq!(retune_sheet(sheet, "D", "G", 0), "Key: G (AG:G)   Capo: 0\nG  D  Em");
}

#[test]
fn test_header_drives_source_key() {
    let header = SheetHeader::parse(SHEET);
    let source = header.key.map(|k| k.to_string()).unwrap();
    assert_eq!(source, "G");
    assert_eq!(header.capo, Some(0));
    assert!(transpose_chord_sheet(SHEET, &source, "Bb", 0).contains("Bb           Bb7"));
}

#[test]
fn test_public_key_and_offset_helpers() {
    assert!(is_valid_key("Eb"));
    assert!(!is_valid_key("D#"));
    assert_eq!(calculate_offset("C", "G", 0).unwrap().semitones(), 7);
    assert_eq!(calculate_offset("D", "A", 5).unwrap().semitones(), 2);
    assert!(calculate_offset("C", "Z", 0).is_err());
    assert_eq!(transpose_chord("Ebmaj7/G", 4).unwrap(), "Gmaj7/B");
}
