//! # Error Types
//!
//! This module defines all error types for the chordsheet library.
//!
//! The core placement and transposition operations are total and never
//! return errors: unrecognized chords pass through and malformed grid
//! positions are clamped. Errors only come from reading sheet sources and
//! stored song records, and from the strict chord parser.
//!
//! ## Error Types
//! - `ParseError` - Malformed sheet source, with the line it was found on
//! - `MetadataError` - Invalid YAML frontmatter or JSON song records
//! - `InvalidChord` - A chord symbol the strict parser rejects
//!
//! ## Usage
//! ```rust
//! use chordsheet::{render, SheetError};
//!
//! let source = "---\ntitle: Test\n---\nHello";
//! match render(source) {
//!     Ok(text) => println!("{}", text),
//!     Err(SheetError::ParseError { line, message }) => {
//!         eprintln!("Parse error at line {}: {}", line, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    /// Parse error with location information.
    ///
    /// Occurs when the sheet source is structurally broken, e.g. a
    /// frontmatter block that is never closed.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::ParseError {
    ///     line: 1,
    ///     message: "Frontmatter block is not closed with '---'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 1: Frontmatter block is not closed with '---'");
    /// ```
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid metadata error.
    ///
    /// Occurs when YAML frontmatter or a stored JSON song record cannot be
    /// deserialized.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::MetadataError("pitch must be an integer".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: pitch must be an integer");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    /// Chord symbol rejected by the strict parser.
    ///
    /// `transpose` never produces this; it passes such symbols through.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::InvalidChord {
    ///     chord: "C/E/G".to_string(),
    ///     reason: "more than one '/'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid chord 'C/E/G': more than one '/'");
    /// ```
    #[error("Invalid chord '{chord}': {reason}")]
    InvalidChord { chord: String, reason: String },
}
