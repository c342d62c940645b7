//! # Error Types
//!
//! This module defines all error types for the chordshift engine.
//!
//! Most of these never reach a sheet-level caller: [`crate::transpose_chord_sheet`]
//! absorbs every failure and hands back the original sheet. They surface from the
//! lower-level functions (`transpose_chord`, `calculate_offset`) and from the CLI.
//!
//! ## Error Types
//! - `InvalidKey` - a key outside the 12 canonical spellings
//! - `UnparseableToken` - text that does not satisfy the chord grammar
//! - `MalformedInput` - input that is not text at all
//! - `Config` - invalid YAML configuration
//! - `Io` - file I/O from the command-line front end
//!
//! ## Usage
//! ```rust
//! use chordshift::{calculate_offset, TransposeError};
//!
//! match calculate_offset("C", "H", 0) {
//!     Ok(offset) => println!("Shift by {} semitones", offset.semitones()),
//!     Err(TransposeError::InvalidKey(key)) => eprintln!("Unknown key {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransposeError {
    /// A key that is not one of the 12 canonical spellings.
    ///
    /// # Example
    /// ```
    /// # use chordshift::TransposeError;
    /// let err = TransposeError::InvalidKey("Db".to_string());
    /// assert_eq!(err.to_string(), "Invalid key: 'Db'");
    /// ```
    #[error("Invalid key: '{0}'")]
    InvalidKey(String),

    /// Text that looks like a chord but does not satisfy the chord grammar.
    ///
    /// # Example
    /// ```
    /// # use chordshift::TransposeError;
    /// let err = TransposeError::UnparseableToken("Hm7".to_string());
    /// assert_eq!(err.to_string(), "Cannot parse chord: 'Hm7'");
    /// ```
    #[error("Cannot parse chord: '{0}'")]
    UnparseableToken(String),

    /// Input that is not text.
    ///
    /// # Example
    /// ```
    /// # use chordshift::TransposeError;
    /// let err = TransposeError::MalformedInput("sheet is not valid UTF-8".to_string());
    /// assert_eq!(err.to_string(), "Malformed input: sheet is not valid UTF-8");
    /// ```
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Invalid YAML configuration.
    ///
    /// # Example
    /// ```
    /// # use chordshift::TransposeError;
    /// let err = TransposeError::Config("unknown field `tempo`".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: unknown field `tempo`");
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File I/O failure, reported with the underlying error's message.
    ///
    /// # Example
    /// ```
    /// # use chordshift::TransposeError;
    /// use std::io;
    ///
    /// let err = TransposeError::from(io::Error::new(io::ErrorKind::NotFound, "sheet.txt not found"));
    /// assert!(matches!(err, TransposeError::Io(_)));
    /// assert_eq!(err.to_string(), "sheet.txt not found");
    /// ```
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for TransposeError {
    fn from(err: serde_yaml::Error) -> Self {
        TransposeError::Config(err.to_string())
    }
}
