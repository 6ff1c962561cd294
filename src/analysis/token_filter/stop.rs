//! Stop filter implementation.
//!
//! This module provides a filter that removes common words (stop words) that
//! typically don't contribute to search relevance, along with tokens that are
//! too short or too long. Stopped tokens are dropped, or kept and marked when
//! the stream was started with `remove_stopwords = false`.
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::TokenStream;
//! use kopis::analysis::token_filter::StopFilter;
//! use kopis::analysis::tokenizer::RegexTokenizer;
//!
//! let analyzer = (RegexTokenizer::new().unwrap() | StopFilter::new()).build().unwrap();
//! let texts = analyzer
//!     .analyze("this is a test", &AnalysisOptions::default())
//!     .unwrap()
//!     .collect_texts();
//!
//! // "this", "is" and "a" are removed as stop words
//! assert_eq!(texts, vec!["test"]);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use super::Filter;
use crate::analysis::lang;
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, Token, TokenStream};

/// Default English stop words list.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "for", "from", "have", "if", "in",
    "is", "it", "may", "not", "of", "on", "or", "tbd", "that", "the", "this", "to", "us", "we",
    "when", "will", "with", "yet", "you", "your",
];

static DEFAULT_STOP_SET: LazyLock<Arc<HashSet<String>>> = LazyLock::new(|| {
    Arc::new(DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect())
});

/// A filter that stops common words and tokens outside a length range.
///
/// Lengths are counted in characters. A token is stopped if it is shorter
/// than `min_size`, longer than `max_size`, or in the stop set. Tokens that
/// are not stopped pass through unchanged, except that `renumber` compacts
/// their positions to close the gaps left by removed tokens.
///
/// Make sure you precede this filter with a lowercase filter when the stop
/// set is lowercase.
#[derive(Clone, Debug, PartialEq)]
pub struct StopFilter {
    stop_words: Arc<HashSet<String>>,
    min_size: usize,
    max_size: Option<usize>,
    renumber: bool,
}

impl StopFilter {
    /// Create a new stop filter with the default English stop words.
    pub fn new() -> Self {
        StopFilter {
            stop_words: Arc::clone(&DEFAULT_STOP_SET),
            min_size: 2,
            max_size: None,
            renumber: false,
        }
    }

    /// Create a stop filter with a custom stop word set.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
            ..Self::new()
        }
    }

    /// Create a stop filter from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(Into::into).collect())
    }

    /// Create a stop filter using a language's stop-word list.
    ///
    /// Returns `None` if no list is available for `code`.
    pub fn for_language(code: &str) -> Option<Self> {
        lang::stop_words(code).map(|words| Self::with_stop_words(words.clone()))
    }

    /// Add a language's stop words to the current set. Unknown languages are
    /// ignored.
    pub fn add_language(mut self, code: &str) -> Self {
        match lang::stop_words(code) {
            Some(words) => {
                Arc::make_mut(&mut self.stop_words).extend(words.iter().cloned());
            }
            None => log::debug!("no stop words available for language {code:?}"),
        }
        self
    }

    /// Stop tokens shorter than `min_size` characters.
    pub fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    /// Stop tokens longer than `max_size` characters.
    pub fn max_size(mut self, max_size: Option<usize>) -> Self {
        self.max_size = max_size;
        self
    }

    /// Compact the positions of surviving tokens.
    pub fn renumber(mut self, renumber: bool) -> Self {
        self.renumber = renumber;
        self
    }

    /// Check if a word would be stopped.
    pub fn is_stopped(&self, text: &str) -> bool {
        let len = text.chars().count();
        len < self.min_size
            || self.max_size.is_some_and(|max| len > max)
            || self.stop_words.contains(text)
    }

    /// Check if a word is in the stop set.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        _options: &AnalysisOptions,
    ) -> BoxTokenStream<'a> {
        Box::new(StopTokenStream {
            tail: tokens,
            filter: self,
            last_pos: None,
        })
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

struct StopTokenStream<'a> {
    tail: BoxTokenStream<'a>,
    filter: &'a StopFilter,
    last_pos: Option<usize>,
}

impl TokenStream for StopTokenStream<'_> {
    fn advance(&mut self) -> bool {
        while self.tail.advance() {
            let token = self.tail.token_mut();

            if self.filter.is_stopped(&token.text) {
                if token.remove_stopwords() {
                    continue;
                }
                token.stopped = true;
                return true;
            }

            token.stopped = false;
            if self.filter.renumber {
                if let Some(position) = token.position {
                    let position = self.last_pos.map_or(position, |last| last.saturating_add(1));
                    token.position = Some(position);
                    self.last_pos = Some(position);
                }
            }
            return true;
        }
        false
    }

    fn token(&self) -> &Token {
        self.tail.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.tail.token_mut()
    }
}
