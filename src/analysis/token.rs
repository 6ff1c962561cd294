//! Token types and the token stream abstraction.
//!
//! # Record reuse
//!
//! A token stream does **not** hand out a fresh [`Token`] per step. The
//! tokenizer owns exactly one record for the whole call and rewrites it on
//! every [`TokenStream::advance`]; filters mutate that same record through
//! [`TokenStream::token_mut`]. A reference obtained from
//! [`TokenStream::token`] is therefore only meaningful until the next
//! `advance`. The borrow checker enforces this: the reference borrows the
//! stream, so it cannot be held across a pull. Consumers that need to keep a
//! token must `clone()` it.
//!
//! ```
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::TokenStream;
//! use kopis::analysis::tokenizer::{RegexTokenizer, Tokenizer};
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let options = AnalysisOptions::default().with_positions(true);
//! let mut stream = tokenizer.tokenize("hello world", &options);
//!
//! let mut kept = Vec::new();
//! while stream.advance() {
//!     kept.push(stream.token().clone());
//! }
//! assert_eq!(kept[0].text, "hello");
//! assert_eq!(kept[1].position, Some(1));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::options::AnalysisOptions;

/// A single unit of text at some point in the analysis pipeline.
///
/// `mode` and `remove_stopwords` are fixed by the tokenizer from the caller's
/// [`AnalysisOptions`] and are read-only to filters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The current text, rewritten in place by filters.
    pub text: String,

    /// The text as the tokenizer produced it, when `keep_original` was requested.
    pub original_text: Option<String>,

    /// Scoring weight multiplier (default: 1.0).
    pub boost: f32,

    /// Whether a stop condition matched this token.
    pub stopped: bool,

    /// Ordinal position in the stream, when `positions` was requested.
    pub position: Option<usize>,

    /// Byte offset where this token starts in the source text, when `chars` was requested.
    pub start_char: Option<usize>,

    /// Byte offset where this token ends in the source text, when `chars` was requested.
    pub end_char: Option<usize>,

    /// Pipeline-specific flags copied from the call options.
    pub attributes: BTreeMap<String, String>,

    mode: String,
    remove_stopwords: bool,
}

impl Token {
    /// Create a standalone token with default stream settings.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            original_text: None,
            boost: 1.0,
            stopped: false,
            position: None,
            start_char: None,
            end_char: None,
            attributes: BTreeMap::new(),
            mode: String::new(),
            remove_stopwords: true,
        }
    }

    /// Create the shared record for one stream from the call options.
    pub fn for_options(options: &AnalysisOptions) -> Self {
        Token {
            attributes: options.attributes.clone(),
            mode: options.mode.clone(),
            remove_stopwords: options.remove_stopwords,
            ..Token::new(String::new())
        }
    }

    /// The purpose of the stream this token belongs to (e.g. `"index"` or `"query"`).
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Whether stop filters should drop stopped tokens rather than mark them.
    pub fn remove_stopwords(&self) -> bool {
        self.remove_stopwords
    }

    /// Set the position of this token.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the byte offsets of this token.
    pub fn with_offsets(mut self, start_char: usize, end_char: usize) -> Self {
        self.start_char = Some(start_char);
        self.end_char = Some(end_char);
        self
    }

    /// Set the boost factor for this token.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Set the stream mode of this token.
    pub fn with_mode<S: Into<String>>(mut self, mode: S) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set whether stop filters remove or mark this token.
    pub fn with_remove_stopwords(mut self, remove: bool) -> Self {
        self.remove_stopwords = remove;
        self
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    /// Check if this token is stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Load new text into the record and reset per-token state, reusing buffers.
    pub fn reset_with(&mut self, text: &str, keep_original: bool) {
        self.text.clear();
        self.text.push_str(text);
        self.boost = 1.0;
        self.stopped = false;
        if keep_original {
            let original = self.original_text.get_or_insert_with(String::new);
            original.clear();
            original.push_str(text);
        } else {
            self.original_text = None;
        }
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new(String::new())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A single-pass, pull-based sequence of tokens backed by one reused record.
///
/// The record returned by [`token`](Self::token) is only valid until the next
/// call to [`advance`](Self::advance). Streams are finite and fused: once
/// `advance` returns `false` it keeps returning `false`.
pub trait TokenStream {
    /// Move to the next token. Returns `false` when the stream is exhausted.
    fn advance(&mut self) -> bool;

    /// The current token.
    fn token(&self) -> &Token;

    /// Mutable access to the current token.
    fn token_mut(&mut self) -> &mut Token;

    /// Advance and return the current token, if any.
    fn next(&mut self) -> Option<&Token> {
        if self.advance() {
            Some(self.token())
        } else {
            None
        }
    }

    /// Feed every remaining token to `sink`, returning how many were seen.
    fn process(&mut self, sink: &mut dyn FnMut(&Token)) -> usize {
        let mut count = 0;
        while self.advance() {
            sink(self.token());
            count += 1;
        }
        count
    }

    /// Drain the stream, cloning each token.
    fn collect_tokens(mut self) -> Vec<Token>
    where
        Self: Sized,
    {
        let mut tokens = Vec::new();
        while self.advance() {
            tokens.push(self.token().clone());
        }
        tokens
    }

    /// Drain the stream, keeping only the token texts.
    fn collect_texts(mut self) -> Vec<String>
    where
        Self: Sized,
    {
        let mut texts = Vec::new();
        while self.advance() {
            texts.push(self.token().text.clone());
        }
        texts
    }
}

/// A boxed token stream borrowing from the analyzer and the source text.
pub type BoxTokenStream<'a> = Box<dyn TokenStream + 'a>;

impl<T: TokenStream + ?Sized> TokenStream for Box<T> {
    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn token(&self) -> &Token {
        (**self).token()
    }

    fn token_mut(&mut self) -> &mut Token {
        (**self).token_mut()
    }
}

/// A stream with no tokens.
#[derive(Debug, Default)]
pub struct EmptyTokenStream {
    token: Token,
}

impl EmptyTokenStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStream for EmptyTokenStream {
    fn advance(&mut self) -> bool {
        false
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

/// A stream over already-built tokens, copied one at a time into a single record.
///
/// Useful for feeding filters directly and for replaying stored tokens.
#[derive(Debug)]
pub struct VecTokenStream {
    tokens: std::vec::IntoIter<Token>,
    current: Token,
}

impl VecTokenStream {
    /// Create a stream yielding `tokens` in order.
    pub fn new(tokens: Vec<Token>) -> Self {
        VecTokenStream {
            tokens: tokens.into_iter(),
            current: Token::default(),
        }
    }
}

impl TokenStream for VecTokenStream {
    fn advance(&mut self) -> bool {
        match self.tokens.next() {
            Some(token) => {
                self.current = token;
                true
            }
            None => false,
        }
    }

    fn token(&self) -> &Token {
        &self.current
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.current
    }
}

/// A stream over pre-split strings.
///
/// Positions and offsets are filled in as if the strings were adjacent in the
/// source text, starting at `start_pos` and `start_char`.
pub struct PreTokenizedStream<I> {
    texts: I,
    token: Token,
    positions: bool,
    chars: bool,
    next_pos: usize,
    next_char: usize,
}

impl<I, S> PreTokenizedStream<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// Create a stream over `texts` using the given call options.
    pub fn new<T>(texts: T, options: &AnalysisOptions) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        PreTokenizedStream {
            texts: texts.into_iter(),
            token: Token::for_options(options),
            positions: options.positions,
            chars: options.chars,
            next_pos: options.start_pos,
            next_char: options.start_char,
        }
    }
}

impl<I, S> TokenStream for PreTokenizedStream<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    fn advance(&mut self) -> bool {
        let Some(text) = self.texts.next() else {
            return false;
        };
        let text = text.as_ref();
        self.token.reset_with(text, false);
        if self.positions {
            self.token.position = Some(self.next_pos);
            self.next_pos = self.next_pos.saturating_add(1);
        }
        if self.chars {
            self.token.start_char = Some(self.next_char);
            self.next_char = self.next_char.saturating_add(text.len());
            self.token.end_char = Some(self.next_char);
        }
        true
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream<'a>(self) -> BoxTokenStream<'a>;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream<'a>(self) -> BoxTokenStream<'a> {
        Box::new(VecTokenStream::new(self))
    }
}

/// Yields only the tokens that are not marked as stopped.
pub struct UnstoppedStream<'a> {
    tail: BoxTokenStream<'a>,
}

impl<'a> UnstoppedStream<'a> {
    /// Wrap `tail`, skipping stopped tokens.
    pub fn new(tail: BoxTokenStream<'a>) -> Self {
        UnstoppedStream { tail }
    }
}

impl TokenStream for UnstoppedStream<'_> {
    fn advance(&mut self) -> bool {
        while self.tail.advance() {
            if !self.tail.token().stopped {
                return true;
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello");
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, None);
        assert_eq!(token.start_char, None);
        assert_eq!(token.boost, 1.0);
        assert!(!token.stopped);
        assert!(token.remove_stopwords());
        assert_eq!(token.mode(), "");
    }

    #[test]
    fn test_token_for_options() {
        let options = AnalysisOptions::default()
            .with_mode("query")
            .with_remove_stopwords(false)
            .with_attribute("field", "title");
        let token = Token::for_options(&options);

        assert_eq!(token.mode(), "query");
        assert!(!token.remove_stopwords());
        assert_eq!(token.attributes.get("field").map(String::as_str), Some("title"));
    }

    #[test]
    fn test_reset_with_reuses_record() {
        let mut token = Token::new("first").with_boost(3.0).stop();
        token.reset_with("second", true);

        assert_eq!(token.text, "second");
        assert_eq!(token.original_text.as_deref(), Some("second"));
        assert_eq!(token.boost, 1.0);
        assert!(!token.stopped);

        token.reset_with("third", false);
        assert_eq!(token.original_text, None);
    }

    #[test]
    fn test_clone_is_independent_of_stream() {
        let mut stream = PreTokenizedStream::new(["alfa", "bravo"], &AnalysisOptions::default());
        assert!(stream.advance());
        let copy = stream.token().clone();
        assert!(stream.advance());

        assert_eq!(copy.text, "alfa");
        assert_eq!(stream.token().text, "bravo");
    }

    #[test]
    fn test_pre_tokenized_positions_and_chars() {
        let options = AnalysisOptions::default()
            .with_positions(true)
            .with_chars(true)
            .with_start_pos(5);
        let tokens = PreTokenizedStream::new(vec!["ab", "cde"], &options).collect_tokens();

        assert_eq!(tokens[0].position, Some(5));
        assert_eq!(tokens[1].position, Some(6));
        assert_eq!((tokens[1].start_char, tokens[1].end_char), (Some(2), Some(5)));
    }

    #[test]
    fn test_pre_tokenized_saturates_at_max() {
        let options = AnalysisOptions::default()
            .with_positions(true)
            .with_chars(true)
            .with_start_pos(usize::MAX)
            .with_start_char(usize::MAX - 1);
        let tokens = PreTokenizedStream::new(["ab", "cd"], &options).collect_tokens();

        assert_eq!(tokens[0].position, Some(usize::MAX));
        assert_eq!(tokens[1].position, Some(usize::MAX));
        assert_eq!(tokens[1].start_char, Some(usize::MAX));
        assert_eq!(tokens[1].end_char, Some(usize::MAX));
    }

    #[test]
    fn test_vec_token_stream() {
        let tokens = vec![Token::new("hello"), Token::new("world")];
        let texts = tokens.into_token_stream().collect_texts();
        assert_eq!(texts, vec!["hello", "world"]);
    }

    #[test]
    fn test_unstopped_stream() {
        let tokens = vec![Token::new("a").stop(), Token::new("b"), Token::new("c").stop()];
        let texts = UnstoppedStream::new(tokens.into_token_stream()).collect_texts();
        assert_eq!(texts, vec!["b"]);
    }

    #[test]
    fn test_process_counts_tokens() {
        let mut stream = PreTokenizedStream::new(["x", "y", "z"], &AnalysisOptions::default());
        let mut seen = String::new();
        let count = stream.process(&mut |token: &Token| seen.push_str(&token.text));
        assert_eq!(count, 3);
        assert_eq!(seen, "xyz");
        assert!(!stream.advance());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(format!("{}", Token::new("hello")), "hello");
    }
}
