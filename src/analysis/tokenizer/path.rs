//! Path-prefix tokenizer implementation.

use std::sync::Arc;

use regex::{Matches, Regex};

use super::{Emitter, SingleTokenStream, Tokenizer};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, EmptyTokenStream, Token, TokenStream};
use crate::error::{KopisError, Result};

/// Yields every cumulative prefix of a path.
///
/// Each match of the segment expression ends a token covering the input from
/// its start up to the end of that segment.
///
/// # Examples
///
/// ```
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
/// use kopis::analysis::tokenizer::{PathTokenizer, Tokenizer};
///
/// let texts = PathTokenizer::new()
///     .unwrap()
///     .tokenize("/alfa/bravo/charlie", &AnalysisOptions::default())
///     .collect_texts();
/// assert_eq!(texts, vec!["/alfa", "/alfa/bravo", "/alfa/bravo/charlie"]);
/// ```
#[derive(Clone, Debug)]
pub struct PathTokenizer {
    segment: Arc<Regex>,
}

impl PathTokenizer {
    /// Create a tokenizer for `/`-separated paths.
    pub fn new() -> Result<Self> {
        Self::with_expression("[^/]+")
    }

    /// Use a custom segment expression.
    pub fn with_expression(expression: &str) -> Result<Self> {
        let segment = Regex::new(expression)
            .map_err(|e| KopisError::analysis(format!("Invalid path segment pattern: {e}")))?;
        Ok(PathTokenizer {
            segment: Arc::new(segment),
        })
    }

    /// Use a different delimiter character, e.g. `.` for dotted names.
    pub fn with_delimiter(delimiter: char) -> Result<Self> {
        let escaped = regex::escape(delimiter.encode_utf8(&mut [0; 4]));
        Self::with_expression(&format!("[^{escaped}]+"))
    }

    pub fn expression(&self) -> &str {
        self.segment.as_str()
    }
}

impl PartialEq for PathTokenizer {
    fn eq(&self, other: &Self) -> bool {
        self.segment.as_str() == other.segment.as_str()
    }
}

impl Tokenizer for PathTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str, options: &AnalysisOptions) -> BoxTokenStream<'a> {
        if !options.tokenize {
            return Box::new(SingleTokenStream::new(text, options));
        }
        if text.is_empty() {
            return Box::new(EmptyTokenStream::new());
        }
        Box::new(PathTokenStream {
            text,
            segments: self.segment.find_iter(text),
            emitter: Emitter::new(options),
        })
    }

    fn name(&self) -> &'static str {
        "path"
    }
}

struct PathTokenStream<'a> {
    text: &'a str,
    segments: Matches<'a, 'a>,
    emitter: Emitter,
}

impl TokenStream for PathTokenStream<'_> {
    fn advance(&mut self) -> bool {
        match self.segments.next() {
            Some(segment) => {
                let end = segment.end();
                self.emitter.emit(&self.text[..end], 0, end);
                true
            }
            None => false,
        }
    }

    fn token(&self) -> &Token {
        self.emitter.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.emitter.token_mut()
    }
}
