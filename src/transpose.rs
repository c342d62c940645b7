use crate::chord::ChordToken;
use crate::enharmonic::normalize;
use crate::error::TransposeError;
use crate::pitch::{Key, Spelling};

/// Semitones to add to every pitch class, reduced to 0..=11
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TranspositionOffset(u8);

impl TranspositionOffset {
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(12) as u8)
    }

    /// Offset that makes `source`-key chord shapes, played with a capo on fret
    /// `capo`, sound in `target`.
    ///
    /// The capo already raises every shape by `capo` semitones, so the written
    /// chords only move by what is left: `target - source - capo`.
    pub fn between(source: Key, target: Key, capo: i32) -> Self {
        let source = source.pitch_class().value() as i32;
        let target = target.pitch_class().value() as i32;
        Self::new(target - source - capo.rem_euclid(12))
    }

    pub fn semitones(self) -> u8 {
        self.0
    }

    pub fn is_identity(self) -> bool {
        self.0 == 0
    }
}

/// Compute the transposition offset between two keys, given a capo position.
///
/// # Example
/// ```
/// use chordshift::calculate_offset;
///
/// assert_eq!(calculate_offset("C", "G", 0)?.semitones(), 7);
/// assert_eq!(calculate_offset("D", "A", 5)?.semitones(), 2);
/// # Ok::<(), chordshift::TransposeError>(())
/// ```
///
/// # Errors
/// [`TransposeError::InvalidKey`] if either key is not one of the 12 canonical spellings.
pub fn calculate_offset(
    source_key: &str,
    target_key: &str,
    capo: i32,
) -> Result<TranspositionOffset, TransposeError> {
    let source: Key = source_key.parse()?;
    let target: Key = target_key.parse()?;
    Ok(TranspositionOffset::between(source, target, capo))
}

/// Move a single note name by `offset`, returning its canonical spelling.
pub fn transpose_note(note: Spelling, offset: TranspositionOffset) -> Result<String, TransposeError> {
    let pitch_class = note
        .pitch_class()
        .ok_or_else(|| TransposeError::UnparseableToken(note.to_string()))?;
    let spelled = pitch_class
        .shifted(offset.semitones() as i32)
        .canonical_spelling()
        .to_string();
    Ok(normalize(&spelled).into_owned())
}

/// Transpose one chord symbol by `offset` semitones (any integer, reduced mod 12).
///
/// # Example
/// ```
/// use chordshift::transpose_chord;
///
/// assert_eq!(transpose_chord("Bm7", 2)?, "C#m7");
/// assert_eq!(transpose_chord("C/E", 7)?, "G/B");
/// assert_eq!(transpose_chord("F#", -1)?, "F");
/// # Ok::<(), chordshift::TransposeError>(())
/// ```
pub fn transpose_chord(token: &str, offset: i32) -> Result<String, TransposeError> {
    ChordToken::parse(token)?.transpose(TranspositionOffset::new(offset))
}
