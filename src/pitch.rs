//! # Pitch Classes and Note Spellings
//!
//! The twelve-position pitch circle the whole engine works on.
//!
//! ## Lookup vs. Display
//! Lookup accepts every natural or single-accidental spelling a chord sheet is
//! likely to use (`C#` and `Db` both map to pitch class 1). Display always goes
//! through one fixed canonical table:
//!
//! ```text
//! 0  1  2  3  4  5  6  7  8  9  10 11
//! C  C# D  Eb E  F  F# G  G# A  Bb B
//! ```
//!
//! The table mixes sharps and flats. It is the spelling guitarists expect on
//! chord charts, and it doubles as the closed set of valid [`Key`]s.
//!
//! `Cb`, `Fb`, `E#` and `B#` are not part of the table: a chord rooted on one
//! of them is treated as plain text.

use crate::error::TransposeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Note letter A-G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }

    /// Pitch class of the natural note
    pub fn semitone(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    pub fn semitones(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// One of the 12 equivalence classes of pitch under octave identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Reduce any semitone count onto the circle
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Move around the circle, wrapping in both directions
    pub fn shifted(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones.rem_euclid(12))
    }

    pub fn canonical_spelling(self) -> Spelling {
        CANONICAL[self.0 as usize]
    }
}

/// A note name as written: letter plus at most one accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spelling {
    pub name: NoteName,
    pub accidental: Accidental,
}

const fn spelled(name: NoteName, accidental: Accidental) -> Spelling {
    Spelling { name, accidental }
}

const CANONICAL: [Spelling; 12] = [
    spelled(NoteName::C, Accidental::Natural),
    spelled(NoteName::C, Accidental::Sharp),
    spelled(NoteName::D, Accidental::Natural),
    spelled(NoteName::E, Accidental::Flat),
    spelled(NoteName::E, Accidental::Natural),
    spelled(NoteName::F, Accidental::Natural),
    spelled(NoteName::F, Accidental::Sharp),
    spelled(NoteName::G, Accidental::Natural),
    spelled(NoteName::G, Accidental::Sharp),
    spelled(NoteName::A, Accidental::Natural),
    spelled(NoteName::B, Accidental::Flat),
    spelled(NoteName::B, Accidental::Natural),
];

impl Spelling {
    pub fn new(name: NoteName, accidental: Accidental) -> Self {
        spelled(name, accidental)
    }

    /// Table lookup. `None` for the spellings the table leaves out (Cb, Fb, E#, B#).
    pub fn pitch_class(&self) -> Option<PitchClass> {
        match (self.name, self.accidental) {
            (NoteName::C, Accidental::Flat)
            | (NoteName::F, Accidental::Flat)
            | (NoteName::E, Accidental::Sharp)
            | (NoteName::B, Accidental::Sharp) => None,
            (name, accidental) => Some(PitchClass::new(name.semitone() + accidental.semitones())),
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.pitch_class()
            .map_or(false, |pc| pc.canonical_spelling() == *self)
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name.as_char(), self.accidental.as_str())
    }
}

impl FromStr for Spelling {
    type Err = TransposeError;

    /// Parse exactly a letter and an optional `#`/`b`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let name = chars
            .next()
            .and_then(NoteName::from_char)
            .ok_or_else(|| TransposeError::UnparseableToken(s.to_string()))?;
        let accidental = match chars.next() {
            None => Accidental::Natural,
            Some(c) => Accidental::from_char(c)
                .ok_or_else(|| TransposeError::UnparseableToken(s.to_string()))?,
        };
        if chars.next().is_some() {
            return Err(TransposeError::UnparseableToken(s.to_string()));
        }
        Ok(Spelling::new(name, accidental))
    }
}

/// Look up the pitch class of a written note name.
///
/// ```
/// use chordshift::pitch::pitch_class_of;
///
/// assert_eq!(pitch_class_of("C#").map(|pc| pc.value()), Some(1));
/// assert_eq!(pitch_class_of("Db").map(|pc| pc.value()), Some(1));
/// assert_eq!(pitch_class_of("Cb"), None);
/// ```
pub fn pitch_class_of(spelling: &str) -> Option<PitchClass> {
    spelling.parse::<Spelling>().ok()?.pitch_class()
}

pub fn canonical_spelling(pitch_class: PitchClass) -> Spelling {
    pitch_class.canonical_spelling()
}

/// A musical key, restricted to the 12 canonical spellings.
///
/// Enharmonic alternatives (`Db`, `A#`, ...) are valid chord roots but not valid keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(PitchClass);

impl Key {
    pub fn from_pitch_class(pitch_class: PitchClass) -> Self {
        Self(pitch_class)
    }

    pub fn pitch_class(self) -> PitchClass {
        self.0
    }

    pub fn spelling(self) -> Spelling {
        self.0.canonical_spelling()
    }

    /// All keys in pitch-class order, C first
    pub fn all() -> impl Iterator<Item = Key> {
        (0..12).map(|pc| Key(PitchClass::new(pc)))
    }

    /// The key `semitones` away, wrapping around the circle
    pub fn shifted(self, semitones: i32) -> Self {
        Self(self.0.shifted(semitones))
    }
}

impl FromStr for Key {
    type Err = TransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Spelling>() {
            Ok(spelling) if spelling.is_canonical() => {
                spelling.pitch_class().map(Key).ok_or_else(|| TransposeError::InvalidKey(s.to_string()))
            }
            _ => Err(TransposeError::InvalidKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = TransposeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.spelling().fmt(f)
    }
}

/// Whether `value` names one of the 12 canonical keys
pub fn is_valid_key(value: &str) -> bool {
    value.parse::<Key>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharp_and_flat_lookup_agree() {
        let pairs = [("C#", "Db"), ("D#", "Eb"), ("F#", "Gb"), ("G#", "Ab"), ("A#", "Bb")];
        for (sharp, flat) in pairs {
            assert_eq!(pitch_class_of(sharp), pitch_class_of(flat), "{} vs {}", sharp, flat);
            assert!(pitch_class_of(sharp).is_some());
        }
    }

    #[test]
    fn test_lookup_values() {
        let expected = [
            ("C", 0), ("C#", 1), ("Db", 1), ("D", 2), ("D#", 3), ("Eb", 3), ("E", 4), ("F", 5),
            ("F#", 6), ("Gb", 6), ("G", 7), ("G#", 8), ("Ab", 8), ("A", 9), ("A#", 10), ("Bb", 10),
            ("B", 11),
        ];
        for (spelling, pc) in expected {
            assert_eq!(pitch_class_of(spelling), Some(PitchClass::new(pc)), "{}", spelling);
        }
    }

    #[test]
    fn test_spellings_outside_table() {
        for spelling in ["Cb", "Fb", "E#", "B#", "H", "c", "C##", "", "Cm"] {
            assert_eq!(pitch_class_of(spelling), None, "{}", spelling);
        }
    }

    #[test]
    fn test_canonical_table() {
        let names: Vec<String> = (0..12)
            .map(|pc| canonical_spelling(PitchClass::new(pc)).to_string())
            .collect();
        assert_eq!(
            names,
            vec!["C", "C#", "D", "Eb", "E", "F", "F#", "G", "G#", "A", "Bb", "B"]
        );
    }

    #[test]
    fn test_pitch_class_wraps() {
        assert_eq!(PitchClass::new(-1).value(), 11);
        assert_eq!(PitchClass::new(12).value(), 0);
        assert_eq!(PitchClass::new(11).shifted(3).value(), 2);
        assert_eq!(PitchClass::new(2).shifted(-5).value(), 9);
        assert_eq!(PitchClass::new(11).shifted(i32::MAX).value(), 6);
        assert_eq!(PitchClass::new(0).shifted(i32::MIN).value(), 4);
    }

    #[test]
    fn test_valid_keys() {
        for key in ["C", "C#", "D", "Eb", "E", "F", "F#", "G", "G#", "A", "Bb", "B"] {
            assert!(is_valid_key(key), "{}", key);
        }
        for key in ["Db", "D#", "Gb", "Ab", "A#", "Cb", "H", "", "c", "C "] {
            assert!(!is_valid_key(key), "{}", key);
        }
    }

    #[test]
    fn test_key_display_round_trips() {
        for key in Key::all() {
            assert_eq!(key.to_string().parse::<Key>().unwrap(), key);
        }
        assert_eq!(Key::all().count(), 12);
    }

    #[test]
    fn test_key_serde() {
        let key: Key = serde_yaml::from_str("Bb").unwrap();
        assert_eq!(key.to_string(), "Bb");
        assert!(serde_yaml::from_str::<Key>("Db").is_err());
        assert_eq!(serde_yaml::to_string(&key).unwrap().trim(), "Bb");
    }
}
