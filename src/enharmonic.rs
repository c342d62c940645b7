//! Enharmonic clean-up for spellings that stack two accidentals.
//!
//! Naive arithmetic on note names (adding a `#` to `Eb`, a `b` to `C#`) yields
//! `Eb#`, `C#b`, `F##`, `Cbb` and friends. None of those belong on a chord chart.
//! [`normalize`] folds each of them onto the canonical spelling of the pitch class
//! it denotes. The transposer always emits canonical spellings, so in a normal
//! pass this is a no-op.

use crate::pitch::{Accidental, NoteName, PitchClass};
use std::borrow::Cow;

/// Collapse a two-accidental artifact onto its canonical single-accidental spelling.
///
/// Any other input (naturals, single accidentals, unrecognized text) is returned as-is.
///
/// ```
/// use chordshift::enharmonic::normalize;
///
/// assert_eq!(normalize("Cbb"), "Bb");
/// assert_eq!(normalize("E##"), "F#");
/// assert_eq!(normalize("C#b"), "C");
/// assert_eq!(normalize("Db"), "Db");
/// ```
pub fn normalize(spelling: &str) -> Cow<'_, str> {
    match artifact_pitch_class(spelling) {
        Some(pc) => Cow::Owned(pc.canonical_spelling().to_string()),
        None => Cow::Borrowed(spelling),
    }
}

/// Pitch class of `X##`, `Xbb`, `X#b` or `Xb#`; `None` for anything else.
fn artifact_pitch_class(spelling: &str) -> Option<PitchClass> {
    let mut chars = spelling.chars();
    let name = NoteName::from_char(chars.next()?)?;
    let first = Accidental::from_char(chars.next()?)?;
    let second = Accidental::from_char(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(PitchClass::new(
        name.semitone() + first.semitones() + second.semitones(),
    ))
}
