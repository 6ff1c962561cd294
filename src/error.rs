//! Error types for the Kopis library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`KopisError`] enum. Errors are raised at the edges of the analysis
//! pipeline: when a stage is configured, when stages are composed, and when
//! raw input is decoded. A token stream never fails halfway through.
//!
//! # Examples
//!
//! ```
//! use kopis::error::{KopisError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KopisError::composition("tokenizer must come first"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Kopis operations.
#[derive(Error, Debug)]
pub enum KopisError {
    /// Raw input could not be interpreted as UTF-8 text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Illegal stage chaining (a tokenizer after position 0, or no tokenizer).
    #[error("Composition error: {0}")]
    Composition(String),

    /// Stage configuration errors (invalid patterns, malformed charset tables).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Analyzer configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (reading input or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error wrapped with context, such as the config path the CLI failed
    /// to load. Displays the whole context chain.
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KopisError.
pub type Result<T> = std::result::Result<T, KopisError>;

impl KopisError {
    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        KopisError::Encoding(msg.into())
    }

    /// Create a new composition error.
    pub fn composition<S: Into<String>>(msg: S) -> Self {
        KopisError::Composition(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KopisError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        KopisError::Config(msg.into())
    }

    /// Returns true if this is a composition error.
    pub fn is_composition(&self) -> bool {
        matches!(self, KopisError::Composition(_))
    }

    /// Returns true if this is an encoding error.
    pub fn is_encoding(&self) -> bool {
        matches!(self, KopisError::Encoding(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KopisError::encoding("invalid utf-8");
        assert_eq!(error.to_string(), "Encoding error: invalid utf-8");
        assert!(error.is_encoding());

        let error = KopisError::composition("tokenizer not first");
        assert_eq!(error.to_string(), "Composition error: tokenizer not first");
        assert!(error.is_composition());

        let error = KopisError::analysis("bad pattern");
        assert_eq!(error.to_string(), "Analysis error: bad pattern");
        assert!(!error.is_composition());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let kopis_error = KopisError::from(io_error);

        match kopis_error {
            KopisError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
