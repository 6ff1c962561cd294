//! Whole-input tokenizer implementation.

use super::{SingleTokenStream, Tokenizer};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::BoxTokenStream;

/// Yields the entire input as a single token.
///
/// For indexed but untokenized values such as identifiers or paths.
///
/// # Examples
///
/// ```
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
/// use kopis::analysis::tokenizer::{IdTokenizer, Tokenizer};
///
/// let texts = IdTokenizer::new()
///     .tokenize("/a/b 123 alpha", &AnalysisOptions::default())
///     .collect_texts();
/// assert_eq!(texts, vec!["/a/b 123 alpha"]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdTokenizer;

impl IdTokenizer {
    pub fn new() -> Self {
        IdTokenizer
    }
}

impl Tokenizer for IdTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str, options: &AnalysisOptions) -> BoxTokenStream<'a> {
        Box::new(SingleTokenStream::new(text, options))
    }

    fn name(&self) -> &'static str {
        "id"
    }
}
