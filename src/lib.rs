//! # chordshift
//!
//! Transposes chord symbols embedded in free-form chord sheets, with capo
//! support, leaving lyrics and markup untouched.
//!
//! ## Entry Points
//! - [`transpose_chord_sheet()`] - rewrite every chord in a sheet (never fails)
//! - [`transpose_chord()`] - transpose a single chord symbol
//! - [`calculate_offset()`] - semitone distance between two keys, minus the capo
//! - [`is_valid_key()`] - check a key against the 12 canonical spellings
//! - [`retune_sheet()`] - update the `Key:`/`Capo:` header and the chords together
//!
//! ## Example
//! ```rust
//! use chordshift::transpose_chord_sheet;
//!
//! let sheet = "[Verse]\n   G          Em\nAmazing grace";
//! assert_eq!(
//!     transpose_chord_sheet(sheet, "G", "A", 0),
//!     "[Verse]\n   A          F#m\nAmazing grace"
//! );
//! ```

pub mod chord;
pub mod config;
pub mod enharmonic;
pub mod error;
pub mod header;
pub mod lexer;
pub mod pitch;
pub mod sheet;
pub mod transpose;

pub use chord::{ChordToken, LiteralText};
pub use config::TransposeConfig;
pub use error::*;
pub use header::{update_header, SheetHeader};
pub use pitch::{is_valid_key, Key, PitchClass, Spelling};
pub use sheet::{retune_sheet, rewrite, transpose_chord_sheet};
pub use transpose::{calculate_offset, transpose_chord, TranspositionOffset};
