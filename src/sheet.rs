//! # Sheet Rewriter
//!
//! Transposes every chord in a free-form chord sheet and leaves the rest alone.
//!
//! ## Pipeline
//! 1. Resolve the offset once from (source key, target key, capo)
//! 2. Walk the sheet line by line; header lines (`Key:`/`Capo:`) are copied as-is
//! 3. Scan each remaining line into text runs and chord-shaped spans
//! 4. Transpose each span that resolves to a [`ChordToken`]; anything else is
//!    copied verbatim
//!
//! Lyrics, section markers, markdown and punctuation come out byte-identical.
//! The only length changes are note-name length changes (`E` -> `Eb`).
//!
//! ## Failure Policy
//! [`transpose_chord_sheet`] never fails. An invalid key returns the original
//! sheet; a span that cannot be transposed stays as literal text.

use crate::chord::{ChordToken, LiteralText};
use crate::header::{is_header_line, update_header};
use crate::lexer::{ChordSpan, Lexer, Segment};
use crate::pitch::Key;
use crate::transpose::{calculate_offset, TranspositionOffset};
use std::borrow::Cow;

/// Transpose all chords in `sheet` from `source_key` to `target_key`, with a capo on fret `capo`.
///
/// Returns the sheet unchanged when the keys match and there is no capo, or
/// when either key is invalid.
///
/// # Example
/// ```
/// use chordshift::transpose_chord_sheet;
///
/// let sheet = "Cmaj7 Dm7 Em7 Fmaj7 G7 Am7 Bm7b5";
/// assert_eq!(
///     transpose_chord_sheet(sheet, "C", "G", 0),
///     "Gmaj7 Am7 Bm7 Cmaj7 D7 Em7 F#m7b5"
/// );
///
/// // Unknown keys leave the sheet alone
/// assert_eq!(transpose_chord_sheet(sheet, "C", "H", 0), sheet);
/// ```
pub fn transpose_chord_sheet(sheet: &str, source_key: &str, target_key: &str, capo: i32) -> String {
    if source_key == target_key && capo == 0 {
        return sheet.to_string();
    }
    match calculate_offset(source_key, target_key, capo) {
        Ok(offset) => rewrite(sheet, offset),
        Err(e) => {
            log::warn!("Leaving chord sheet untouched: {}", e);
            sheet.to_string()
        }
    }
}

/// Apply `offset` to every chord in `sheet`, skipping header lines.
pub fn rewrite(sheet: &str, offset: TranspositionOffset) -> String {
    let mut out = String::with_capacity(sheet.len() + sheet.len() / 8);
    let mut transposed = 0usize;

    for line in sheet.split_inclusive('\n') {
        if is_header_line(line) {
            out.push_str(line);
            continue;
        }
        for segment in Lexer::new(line).tokenize() {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Chord(span) => {
                    let replacement = transpose_span(&span, offset);
                    if let Cow::Owned(_) = replacement {
                        transposed += 1;
                    }
                    out.push_str(&replacement);
                }
            }
        }
    }

    log::debug!(
        "Transposed {} chord(s) by {} semitone(s)",
        transposed,
        offset.semitones()
    );
    out
}

fn transpose_span<'a>(span: &ChordSpan<'a>, offset: TranspositionOffset) -> Cow<'a, str> {
    match ChordToken::from_span(span) {
        Ok(token) => match token.transpose(offset) {
            Ok(chord) => Cow::Owned(chord),
            Err(e) => {
                log::debug!("Leaving '{}' as text: {}", span.text, e);
                Cow::Borrowed(span.text)
            }
        },
        Err(LiteralText(text)) => {
            log::debug!("Leaving '{}' as text: root is not a known note", text);
            Cow::Borrowed(text)
        }
    }
}

/// Change the key and/or capo of a sheet in one step.
///
/// The header fields are rewritten for `target_key` and `capo`, then the chords
/// are moved from `original_key` shapes to the shapes that sound in
/// `target_key` with the capo on.
///
/// # Example
/// ```
/// use chordshift::retune_sheet;
///
/// let sheet = "Key: Bb (AG:G)   Capo: 3\n\n[Pre]\n    G  |  D  \n";
/// assert_eq!(
///     retune_sheet(sheet, "G", "Bb", 0),
///     "Key: Bb (AG:Bb)   Capo: 0\n\n[Pre]\n    Bb  |  F  \n"
/// );
/// ```
pub fn retune_sheet(sheet: &str, original_key: &str, target_key: &str, capo: u32) -> String {
    let (original, target) = match (original_key.parse::<Key>(), target_key.parse::<Key>()) {
        (Ok(original), Ok(target)) => (original, target),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("Leaving chord sheet untouched: {}", e);
            return sheet.to_string();
        }
    };

    let updated = update_header(sheet, target, capo);
    let offset = TranspositionOffset::between(original, target, (capo % 12) as i32);
    rewrite(&updated, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diatonic_progression() {
        assert_eq!(
            transpose_chord_sheet("Cmaj7 Dm7 Em7 Fmaj7 G7 Am7 Bm7b5", "C", "G", 0),
            "Gmaj7 Am7 Bm7 Cmaj7 D7 Em7 F#m7b5"
        );
    }

    #[test]
    fn test_complex_chords() {
        assert_eq!(
            transpose_chord_sheet("Bm7 Cmaj7 Dsus4 Em7", "C", "D", 0),
            "C#m7 Dmaj7 Esus4 F#m7"
        );
    }

    #[test]
    fn test_slash_chords() {
        assert_eq!(transpose_chord_sheet("C/E Am/C D/F#", "C", "G", 0), "G/B Em/G A/C#");
    }

    #[test]
    fn test_identity_keeps_spelling() {
        let sheet = "Db  Gb/Ab  A#m";
        assert_eq!(transpose_chord_sheet(sheet, "G", "G", 0), sheet);
    }

    #[test]
    fn test_zero_offset_with_capo_respells() {
        assert_eq!(transpose_chord_sheet("Db Gb", "G", "Bb", 3), "C# F#");
    }

    #[test]
    fn test_invalid_keys_return_original() {
        let sheet = "C  F  G";
        assert_eq!(transpose_chord_sheet(sheet, "H", "C", 0), sheet);
        assert_eq!(transpose_chord_sheet(sheet, "C", "Db", 0), sheet);
        assert_eq!(transpose_chord_sheet(sheet, "", "", 2), sheet);
    }

    #[test]
    fn test_capo_lowers_written_chords() {
        assert_eq!(transpose_chord_sheet("G  C  D  Em", "G", "G", 2), "F  Bb  C  Dm");
    }

    #[test]
    fn test_extreme_capo_values() {
        // i32::MIN reduces to capo 4, i32::MAX to capo 7
        assert_eq!(transpose_chord_sheet("C G", "C", "D", i32::MIN), "Bb F");
        assert_eq!(transpose_chord_sheet("C G", "C", "D", i32::MAX), "G D");
    }

    #[test]
    fn test_non_chord_text_untouched() {
        let sheet = "[Verse 1]\n   G          Em\nAmazing grace, how sweet the sound\n# Title *bold* Bad Daddy\n";
        assert_eq!(
            transpose_chord_sheet(sheet, "G", "A", 0),
            "[Verse 1]\n   A          F#m\nAmazing grace, how sweet the sound\n# Title *bold* Bad Daddy\n"
        );
    }

    #[test]
    fn test_sharp_alteration_backed_off() {
        assert_eq!(transpose_chord_sheet("C7#9x F", "C", "D", 0), "D7#9x G");
    }

    #[test]
    fn test_header_lines_skipped() {
        let sheet = "Key: G   Capo: 0\nG  D\n";
        assert_eq!(transpose_chord_sheet(sheet, "G", "A", 0), "Key: G   Capo: 0\nA  E\n");
    }

    #[test]
    fn test_invalid_roots_stay_literal() {
        assert_eq!(transpose_chord_sheet("Cb E#m7 C", "C", "D", 0), "Cb E#m7 D");
    }

    #[test]
    fn test_sheet_round_trip() {
        let sheet = "G  D/F#  Em7  Cadd9\nAm7  Bm  C#dim  Eb7";
        for key in Key::all() {
            let there = transpose_chord_sheet(sheet, "G", &key.to_string(), 0);
            let back = transpose_chord_sheet(&there, &key.to_string(), "G", 0);
            assert_eq!(back, sheet, "via {}", key);
        }
    }

    #[test]
    fn test_crlf_and_empty() {
        assert_eq!(transpose_chord_sheet("", "C", "D", 0), "");
        assert_eq!(transpose_chord_sheet("C\r\nG\r\n", "C", "D", 0), "D\r\nA\r\n");
    }

    #[test]
    fn test_retune_capo_change() {
        let sheet = "Key: Bb (AG:G)   Capo: 3\n\n[Pre]\n    G  |  D  \n\n[Verse 1]\n   G          Em";
        assert_eq!(
            retune_sheet(sheet, "G", "Bb", 0),
            "Key: Bb (AG:Bb)   Capo: 0\n\n[Pre]\n    Bb  |  F  \n\n[Verse 1]\n   Bb          Gm"
        );
    }

    #[test]
    fn test_retune_target_change() {
        let sheet = "Key: Bb (AG:G)   Capo: 3\n\n[Chorus]\n      Gmaj7  Asus4    C \n";
        assert_eq!(
            retune_sheet(sheet, "G", "C", 3),
            "Key: C (AG:A)   Capo: 3\n\n[Chorus]\n      Amaj7  Bsus4    D \n"
        );
    }

    #[test]
    fn test_retune_invalid_key() {
        let sheet = "Key: G\nG C";
        assert_eq!(retune_sheet(sheet, "G", "Gb", 0), sheet);
    }
}
