//! Lowercase filter implementation.
//!
//! This module provides a filter that converts all token text to lowercase,
//! which is essential for case-insensitive search. ASCII text is folded in
//! place without allocating.
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::{IntoTokenStream, Token, TokenStream};
//! use kopis::analysis::token_filter::{Filter, LowercaseFilter};
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello"), Token::new("WORLD")];
//! let filtered = filter
//!     .filter(tokens.into_token_stream(), &AnalysisOptions::default())
//!     .collect_texts();
//!
//! assert_eq!(filtered, vec!["hello", "world"]);
//! ```

use super::{Filter, MapTokenStream};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, Token};

/// A filter that converts tokens to lowercase.
///
/// # Behavior
///
/// - Converts all characters to lowercase, including in stopped tokens
/// - Preserves token positions and offsets
/// - Folds pure ASCII text in place
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

fn lowercase(token: &mut Token) {
    if token.text.is_ascii() {
        token.text.make_ascii_lowercase();
    } else {
        token.text = token.text.to_lowercase();
    }
}

impl Filter for LowercaseFilter {
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        _options: &AnalysisOptions,
    ) -> BoxTokenStream<'a> {
        Box::new(MapTokenStream::new(tokens, lowercase))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
