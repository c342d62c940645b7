//! # Sheet Header
//!
//! Chord sheets usually open with a line naming the key and the capo fret:
//!
//! ```text
//! Key: Bb (AG:G)   Capo: 3
//! ```
//!
//! `Key` is the sounding key, `AG` the key of the shapes the guitarist
//! actually fingers, and `Capo` the fret the capo sits on. Labels are
//! case-insensitive and accept the full-width colon `：` as well as `:`.
//!
//! Header lines are never scanned for chords. Their values change only through
//! [`update_header`], which rewrites the value fields and leaves everything
//! else on the line as it was.

use crate::pitch::Key;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

static HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?i:key|capo)\s*[:：]").expect("valid header pattern"));

static KEY_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\b(?i:key)\s*[:：]\s*)([A-G][b#]?)").expect("valid key pattern"));

static SHAPE_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\(\s*(?i:ag)\s*[:：]\s*)([A-G][b#]?)").expect("valid shape-key pattern")
});

static CAPO_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\b(?i:capo)\s*[:：]\s*)(\d+)").expect("valid capo pattern"));

/// Values read from a sheet's header line(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetHeader {
    pub key: Option<Key>,
    pub shape_key: Option<Key>,
    pub capo: Option<u32>,
}

impl SheetHeader {
    /// Read the first `Key:`, `(AG:)` and `Capo:` values in `sheet`.
    ///
    /// A key spelled outside the canonical set (`Db`, `A#`) reads as `None`.
    ///
    /// ```
    /// use chordshift::SheetHeader;
    ///
    /// let header = SheetHeader::parse("Key: Bb (AG:G)   Capo: 3\n\nG  D  Em");
    /// assert_eq!(header.key.map(|k| k.to_string()), Some("Bb".to_string()));
    /// assert_eq!(header.shape_key.map(|k| k.to_string()), Some("G".to_string()));
    /// assert_eq!(header.capo, Some(3));
    /// ```
    pub fn parse(sheet: &str) -> Self {
        let key_at = |pattern: &Regex| {
            pattern
                .captures(sheet)
                .and_then(|caps| caps[2].parse::<Key>().ok())
        };
        SheetHeader {
            key: key_at(&*KEY_FIELD),
            shape_key: key_at(&*SHAPE_FIELD),
            capo: CAPO_FIELD
                .captures(sheet)
                .and_then(|caps| caps[2].parse().ok()),
        }
    }
}

/// Whether `line` carries a `Key:` or `Capo:` label
pub fn is_header_line(line: &str) -> bool {
    HEADER_LINE.is_match(line)
}

/// Rewrite the header value fields for a new key and capo position.
///
/// Every `Key:` value becomes `target`, every `(AG:)` value becomes the key
/// of the shapes played with the capo on (`target` lowered by `capo`), and
/// every `Capo:` number becomes `capo`.
///
/// ```
/// use chordshift::{update_header, Key};
///
/// let target: Key = "C".parse()?;
/// assert_eq!(
///     update_header("Key: Bb (AG:G)   Capo: 3", target, 3),
///     "Key: C (AG:A)   Capo: 3"
/// );
/// # Ok::<(), chordshift::TransposeError>(())
/// ```
pub fn update_header(sheet: &str, target: Key, capo: u32) -> String {
    let shape_key = target.shifted(-((capo % 12) as i32));

    let sheet = KEY_FIELD.replace_all(sheet, |caps: &Captures| format!("{}{}", &caps[1], target));
    let sheet = SHAPE_FIELD.replace_all(&sheet, |caps: &Captures| format!("{}{}", &caps[1], shape_key));
    let sheet = CAPO_FIELD.replace_all(&sheet, |caps: &Captures| format!("{}{}", &caps[1], capo));
    sheet.into_owned()
}
