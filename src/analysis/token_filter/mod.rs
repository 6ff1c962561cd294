//! Token filter implementations for token transformation.
//!
//! Filters wrap the stream produced by the previous stage and mutate the
//! shared token record as it passes through. Filters can rewrite text, drop
//! tokens, or mark them as stopped.
//!
//! # Available Filters
//!
//! - [`pass::PassFilter`] - Yields tokens unchanged
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`strip::StripFilter`] - Trims surrounding whitespace
//! - [`stop::StopFilter`] - Removes or marks stop words
//! - [`multi::MultiFilter`] - Picks a sub-filter by stream mode
//! - [`charset::CharsetFilter`] - Translates characters through a [`CharMap`](crate::analysis::charmap::CharMap)
//! - [`logging::LoggingFilter`] - Logs every token
//! - [`stem::StemFilter`] - Reduces words to their stem form
//!
//! # Filter Chaining
//!
//! Filters are chained after a tokenizer with `|`:
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Stemmer → Index
//! ```

use std::fmt;

use crate::analysis::options::AnalysisOptions;
use crate::analysis::stage::StageEq;
use crate::analysis::token::{BoxTokenStream, Token, TokenStream};

/// Trait for filters that transform token streams.
///
/// A filter receives the upstream stream and returns a new lazy stream over
/// the same token record. The trait requires `Send + Sync` so a pipeline can
/// be shared between threads, and `PartialEq` (through [`StageEq`]) so
/// pipelines compare structurally.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::{BoxTokenStream, Token, TokenStream};
/// use kopis::analysis::token_filter::{Filter, MapTokenStream};
/// use kopis::analysis::tokenizer::RegexTokenizer;
/// use kopis::analysis::PipelineAnalyzer;
///
/// #[derive(Debug, PartialEq)]
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter<'a>(&'a self, tokens: BoxTokenStream<'a>, _options: &AnalysisOptions) -> BoxTokenStream<'a> {
///         Box::new(MapTokenStream::new(tokens, |token: &mut Token| {
///             token.text = token.text.chars().rev().collect();
///         }))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
///
/// let analyzer = PipelineAnalyzer::new(RegexTokenizer::new().unwrap()).add_filter(ReverseFilter);
/// let texts = analyzer
///     .analyze("hello world", &AnalysisOptions::default())
///     .unwrap()
///     .collect_texts();
/// assert_eq!(texts, vec!["olleh", "dlrow"]);
/// ```
pub trait Filter: Send + Sync + fmt::Debug + StageEq {
    /// Wrap `tokens` in this filter.
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        options: &AnalysisOptions,
    ) -> BoxTokenStream<'a>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Whether this filter normalizes word forms. Morphological filters are
    /// skipped when `skip_morphological` is requested.
    fn is_morph(&self) -> bool {
        false
    }

    /// Whether this filter is or contains a morphological filter.
    fn has_morph(&self) -> bool {
        self.is_morph()
    }

    /// Reset run-scoped state such as caches.
    fn clean(&self) {}
}

/// Applies a function to every token of the upstream stream.
pub struct MapTokenStream<'a, F> {
    tail: BoxTokenStream<'a>,
    map: F,
}

impl<'a, F: FnMut(&mut Token)> MapTokenStream<'a, F> {
    pub fn new(tail: BoxTokenStream<'a>, map: F) -> Self {
        MapTokenStream { tail, map }
    }
}

impl<F: FnMut(&mut Token)> TokenStream for MapTokenStream<'_, F> {
    fn advance(&mut self) -> bool {
        if !self.tail.advance() {
            return false;
        }
        (self.map)(self.tail.token_mut());
        true
    }

    fn token(&self) -> &Token {
        self.tail.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.tail.token_mut()
    }
}

// Individual filter modules
pub mod charset;
pub mod logging;
pub mod lowercase;
pub mod multi;
pub mod pass;
pub mod stem;
pub mod stop;
pub mod strip;

// Re-export all filters for convenient access
pub use charset::CharsetFilter;
pub use logging::LoggingFilter;
pub use lowercase::LowercaseFilter;
pub use multi::MultiFilter;
pub use pass::PassFilter;
pub use stem::{FnStemmer, SnowballStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
pub use strip::StripFilter;
