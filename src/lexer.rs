//! # Chord Scanner
//!
//! Splits a chord sheet into plain-text runs and chord-shaped spans.
//!
//! ## Grammar
//! ```text
//! chord      = root quality? digits? alteration? bass?
//! root       = [A-G] accidental?
//! accidental = "#" | "b"
//! quality    = "maj" | "min" | "dim" | "aug" | "sus" | "add" | "dom" | "alt" | "m"
//! digits     = [0-9]+
//! alteration = accidental [0-9]+          (e.g. "b5", "#11")
//! bass       = "/" [A-G] accidental?
//! ```
//!
//! A span must start and end on a word boundary: the byte before it and the
//! byte after it must not be ASCII word characters (`[A-Za-z0-9_]`). That is
//! what keeps `Bad`, `Daddy` or `Gmail` from being read as chords.
//!
//! ## Matching
//! Scanning runs left to right and never overlaps. Optional parts are taken
//! greedily; when the trailing boundary fails the scanner gives them back in
//! this order: bass accidental, bass, alteration, root accidental. `D/F#x`
//! therefore yields the span `D/F`, `C7#9x` yields `C7` and `C#x` yields `C`.
//!
//! The scanner only recognizes shape. Whether the root actually names a pitch
//! class is decided later, in [`crate::chord`].

/// A piece of the input: either untouched text or a chord-shaped span
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Text(&'a str),
    Chord(ChordSpan<'a>),
}

/// A chord-shaped span, split into its parts.
///
/// `root` + `quality` + (`"/"` + `bass`) always reproduces `text` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordSpan<'a> {
    pub text: &'a str,
    pub root: &'a str,
    pub quality: &'a str,
    pub bass: Option<&'a str>,
}

const QUALITIES: [&str; 9] = ["maj", "min", "dim", "aug", "sus", "add", "dom", "alt", "m"];

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_note_letter(b: u8) -> bool {
    (b'A'..=b'G').contains(&b)
}

fn is_accidental(b: u8) -> bool {
    b == b'#' || b == b'b'
}

/// Scanner for chord sheets
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            position: 0,
        }
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    fn at_token_start(&self) -> bool {
        let starts_with_letter = self.byte_at(self.position).map_or(false, is_note_letter);
        let after_boundary = self.position == 0 || !is_word_byte(self.bytes[self.position - 1]);
        starts_with_letter && after_boundary
    }

    fn is_boundary(&self, pos: usize) -> bool {
        self.byte_at(pos).map_or(true, |b| !is_word_byte(b))
    }

    /// Position after an accidental at `pos`, if there is one
    fn accidental_end(&self, pos: usize) -> Option<usize> {
        self.byte_at(pos).filter(|b| is_accidental(*b)).map(|_| pos + 1)
    }

    fn quality_end(&self, pos: usize) -> usize {
        let rest = &self.bytes[pos..];
        QUALITIES
            .iter()
            .find(|q| rest.starts_with(q.as_bytes()))
            .map_or(pos, |q| pos + q.len())
    }

    fn digits_end(&self, mut pos: usize) -> usize {
        while self.byte_at(pos).map_or(false, |b| b.is_ascii_digit()) {
            pos += 1;
        }
        pos
    }

    fn alteration_end(&self, pos: usize) -> usize {
        match self.accidental_end(pos) {
            Some(after) if self.byte_at(after).map_or(false, |b| b.is_ascii_digit()) => {
                self.digits_end(after)
            }
            _ => pos,
        }
    }

    /// Try to read a chord whose root ends at `root_end`
    fn scan_with_root(&self, start: usize, root_end: usize) -> Option<ChordSpan<'a>> {
        let plain_end = self.digits_end(self.quality_end(root_end));
        let altered_end = self.alteration_end(plain_end);
        if let Some(span) = self.scan_with_quality(start, root_end, altered_end) {
            return Some(span);
        }
        // A `#` alteration can be given back: `#` is not a word character
        if altered_end != plain_end {
            return self.scan_with_quality(start, root_end, plain_end);
        }
        None
    }

    /// Try to read a chord whose quality runs from `root_end` to `quality_end`
    fn scan_with_quality(
        &self,
        start: usize,
        root_end: usize,
        quality_end: usize,
    ) -> Option<ChordSpan<'a>> {
        if self.byte_at(quality_end) == Some(b'/')
            && self.byte_at(quality_end + 1).map_or(false, is_note_letter)
        {
            let bass_start = quality_end + 1;
            let letter_end = bass_start + 1;
            let candidates = [self.accidental_end(letter_end), Some(letter_end)];
            for bass_end in candidates.into_iter().flatten() {
                if self.is_boundary(bass_end) {
                    return Some(ChordSpan {
                        text: &self.input[start..bass_end],
                        root: &self.input[start..root_end],
                        quality: &self.input[root_end..quality_end],
                        bass: Some(&self.input[bass_start..bass_end]),
                    });
                }
            }
        }

        if self.is_boundary(quality_end) {
            return Some(ChordSpan {
                text: &self.input[start..quality_end],
                root: &self.input[start..root_end],
                quality: &self.input[root_end..quality_end],
                bass: None,
            });
        }
        None
    }

    fn scan_chord(&self, start: usize) -> Option<ChordSpan<'a>> {
        let letter_end = start + 1;
        if let Some(root_end) = self.accidental_end(letter_end) {
            if let Some(span) = self.scan_with_root(start, root_end) {
                return Some(span);
            }
        }
        self.scan_with_root(start, letter_end)
    }

    pub fn tokenize(&mut self) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut text_start = self.position;

        while self.position < self.bytes.len() {
            if self.at_token_start() {
                if let Some(span) = self.scan_chord(self.position) {
                    if text_start < self.position {
                        segments.push(Segment::Text(&self.input[text_start..self.position]));
                    }
                    self.position += span.text.len();
                    text_start = self.position;
                    segments.push(Segment::Chord(span));
                    continue;
                }
            }
            // Chord spans only start at ASCII letters, so stepping by byte never
            // splits a character that ends up in a slice.
            self.position += 1;
        }

        if text_start < self.bytes.len() {
            segments.push(Segment::Text(&self.input[text_start..]));
        }
        segments
    }
}
