//! Chord tokens: root, opaque suffix, optional slash bass.
//!
//! The suffix (`maj7`, `sus4`, `m7b5`, ...) is never interpreted. It is carried
//! through a transposition byte for byte; only the root and bass spellings change.

use crate::error::TransposeError;
use crate::lexer::ChordSpan;
use crate::pitch::{Accidental, NoteName, Spelling};
use crate::transpose::{transpose_note, TranspositionOffset};
use std::fmt;

/// A chord symbol whose root (and bass, if any) resolve to pitch classes
#[derive(Debug, Clone, PartialEq)]
pub struct ChordToken<'a> {
    pub root: Spelling,
    pub suffix: &'a str,
    pub bass: Option<Spelling>,
}

/// Chord-shaped text that is copied through unchanged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralText<'a>(pub &'a str);

fn resolvable(text: &str) -> Option<Spelling> {
    text.parse::<Spelling>()
        .ok()
        .filter(|spelling| spelling.pitch_class().is_some())
}

impl<'a> ChordToken<'a> {
    /// Accept a scanned span, or hand it back as literal text when the root is
    /// outside the pitch-class table.
    ///
    /// A bass outside the table is not fatal: `/Cb` simply stays in the suffix.
    pub fn from_span(span: &ChordSpan<'a>) -> Result<Self, LiteralText<'a>> {
        let root = resolvable(span.root).ok_or(LiteralText(span.text))?;
        match span.bass.and_then(resolvable) {
            Some(bass) => Ok(ChordToken {
                root,
                suffix: span.quality,
                bass: Some(bass),
            }),
            None => Ok(ChordToken {
                root,
                suffix: &span.text[span.root.len()..],
                bass: None,
            }),
        }
    }

    /// Parse a standalone chord symbol.
    ///
    /// Looser than the sheet scanner: everything after the root is suffix, and a
    /// trailing `/X` is read as a bass when `X` is a known note name.
    ///
    /// ```
    /// use chordshift::chord::ChordToken;
    ///
    /// let chord = ChordToken::parse("Am7/G").unwrap();
    /// assert_eq!(chord.root.to_string(), "A");
    /// assert_eq!(chord.suffix, "m7");
    /// assert_eq!(chord.bass.map(|b| b.to_string()), Some("G".to_string()));
    /// ```
    pub fn parse(token: &'a str) -> Result<Self, TransposeError> {
        let unparseable = || TransposeError::UnparseableToken(token.to_string());

        let mut chars = token.chars();
        let name = chars.next().and_then(NoteName::from_char).ok_or_else(unparseable)?;
        let accidental = chars.next().and_then(Accidental::from_char).unwrap_or_default();
        let root = Spelling::new(name, accidental);
        if root.pitch_class().is_none() {
            return Err(unparseable());
        }

        let rest = &token[root.to_string().len()..];
        if let Some(slash) = rest.rfind('/') {
            if let Some(bass) = resolvable(&rest[slash + 1..]) {
                return Ok(ChordToken {
                    root,
                    suffix: &rest[..slash],
                    bass: Some(bass),
                });
            }
        }
        Ok(ChordToken {
            root,
            suffix: rest,
            bass: None,
        })
    }

    /// Render this chord moved by `offset`. Root and bass shift together.
    pub fn transpose(&self, offset: TranspositionOffset) -> Result<String, TransposeError> {
        let mut out = transpose_note(self.root, offset)?;
        out.push_str(self.suffix);
        if let Some(bass) = self.bass {
            out.push('/');
            out.push_str(&transpose_note(bass, offset)?);
        }
        Ok(out)
    }
}

impl fmt::Display for ChordToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)?;
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, Segment};

    fn span(input: &str) -> ChordSpan<'_> {
        match Lexer::new(input).tokenize().into_iter().next() {
            Some(Segment::Chord(span)) => span,
            other => panic!("Expected chord, got {:?}", other),
        }
    }

    #[test]
    fn test_from_span() {
        let token = ChordToken::from_span(&span("F#m7b5/E")).unwrap();
        assert_eq!(token.root.to_string(), "F#");
        assert_eq!(token.suffix, "m7b5");
        assert_eq!(token.bass.map(|b| b.to_string()), Some("E".to_string()));
        assert_eq!(token.to_string(), "F#m7b5/E");
    }

    #[test]
    fn test_invalid_root_is_literal() {
        assert_eq!(ChordToken::from_span(&span("Cb")), Err(LiteralText("Cb")));
        assert_eq!(ChordToken::from_span(&span("E#m7")), Err(LiteralText("E#m7")));
    }

    #[test]
    fn test_invalid_bass_stays_in_suffix() {
        let token = ChordToken::from_span(&span("G/Cb")).unwrap();
        assert_eq!(token.suffix, "/Cb");
        assert_eq!(token.bass, None);
        assert_eq!(token.to_string(), "G/Cb");
    }

    #[test]
    fn test_parse_standalone() {
        let token = ChordToken::parse("Bbsus4").unwrap();
        assert_eq!(token.root.to_string(), "Bb");
        assert_eq!(token.suffix, "sus4");

        let token = ChordToken::parse("C/E").unwrap();
        assert_eq!(token.suffix, "");
        assert_eq!(token.bass.map(|b| b.to_string()), Some("E".to_string()));

        let token = ChordToken::parse("C6/9").unwrap();
        assert_eq!(token.suffix, "6/9");
        assert_eq!(token.bass, None);
    }

    #[test]
    fn test_parse_rejects_non_chords() {
        for token in ["", "H7", "cm", "Cb5", "Fbmaj7", "7"] {
            assert!(
                matches!(ChordToken::parse(token), Err(TransposeError::UnparseableToken(_))),
                "{}",
                token
            );
        }
    }

    #[test]
    fn test_transpose_keeps_suffix() {
        let token = ChordToken::parse("Dm7b5/Ab").unwrap();
        assert_eq!(token.transpose(TranspositionOffset::new(2)).unwrap(), "Em7b5/Bb");
    }
}
