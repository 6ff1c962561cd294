//! Tokenizer implementations for text analysis.
//!
//! A tokenizer is the first stage of every pipeline. It owns the single
//! [`Token`] record for the call and rewrites it as it walks the input.

use std::fmt;

use crate::analysis::options::AnalysisOptions;
use crate::analysis::stage::StageEq;
use crate::analysis::token::{BoxTokenStream, Token, TokenStream};

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync + fmt::Debug + StageEq {
    /// Tokenize `text` into a lazy stream of tokens.
    ///
    /// Empty input yields an empty stream. When `options.tokenize` is false
    /// the whole input is emitted as a single token.
    fn tokenize<'a>(&'a self, text: &'a str, options: &AnalysisOptions) -> BoxTokenStream<'a>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Reset run-scoped state. Tokenizers are stateless by default.
    fn clean(&self) {}
}

// Individual tokenizer modules
pub mod charset;
pub mod id;
pub mod path;
pub mod regex;

// Re-export all tokenizers for convenient access
pub use charset::CharsetTokenizer;
pub use id::IdTokenizer;
pub use path::PathTokenizer;
pub use regex::RegexTokenizer;

/// Writes successive tokens into one shared record.
///
/// Tracks the next position and applies the caller's `start_char` to the
/// relative byte offsets handed to [`emit`](Self::emit).
#[derive(Debug)]
pub(crate) struct Emitter {
    token: Token,
    positions: bool,
    chars: bool,
    keep_original: bool,
    next_pos: usize,
    start_char: usize,
}

impl Emitter {
    pub(crate) fn new(options: &AnalysisOptions) -> Self {
        Emitter {
            token: Token::for_options(options),
            positions: options.positions,
            chars: options.chars,
            keep_original: options.keep_original,
            next_pos: options.start_pos,
            start_char: options.start_char,
        }
    }

    /// Load `text` spanning `start..end` of the input into the record.
    pub(crate) fn emit(&mut self, text: &str, start: usize, end: usize) {
        self.token.reset_with(text, self.keep_original);
        if self.positions {
            self.token.position = Some(self.next_pos);
        }
        self.next_pos = self.next_pos.saturating_add(1);
        if self.chars {
            self.token.start_char = Some(self.start_char.saturating_add(start));
            self.token.end_char = Some(self.start_char.saturating_add(end));
        }
    }

    pub(crate) fn token(&self) -> &Token {
        &self.token
    }

    pub(crate) fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

/// Emits the whole input as one token.
///
/// Used by the ID tokenizer and by any tokenizer called with
/// `tokenize = false`.
pub struct SingleTokenStream<'a> {
    text: &'a str,
    emitter: Emitter,
    done: bool,
}

impl<'a> SingleTokenStream<'a> {
    pub fn new(text: &'a str, options: &AnalysisOptions) -> Self {
        SingleTokenStream {
            text,
            emitter: Emitter::new(options),
            done: text.is_empty(),
        }
    }
}

impl TokenStream for SingleTokenStream<'_> {
    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        self.emitter.emit(self.text, 0, self.text.len());
        true
    }

    fn token(&self) -> &Token {
        self.emitter.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.emitter.token_mut()
    }
}
