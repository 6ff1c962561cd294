//! Character-map tokenizer implementation.

use std::str::CharIndices;
use std::sync::Arc;

use super::{Emitter, SingleTokenStream, Tokenizer};
use crate::analysis::charmap::CharMap;
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, EmptyTokenStream, Token, TokenStream};
use crate::error::Result;

/// Tokenizes by translating every character through a [`CharMap`].
///
/// Break characters end the current token and consecutive breaks collapse.
/// Token text is the translated text; offsets point into the untranslated
/// input. Combined with a Sphinx charset table this does case folding and
/// word splitting in one pass.
///
/// # Examples
///
/// ```
/// use kopis::analysis::charmap::CharMap;
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
/// use kopis::analysis::tokenizer::{CharsetTokenizer, Tokenizer};
///
/// let tokenizer = CharsetTokenizer::from_charset_table("A..Z->a..z, a..z").unwrap();
/// let texts = tokenizer
///     .tokenize("Hello, World", &AnalysisOptions::default())
///     .collect_texts();
/// assert_eq!(texts, vec!["hello", "world"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CharsetTokenizer {
    char_map: Arc<CharMap>,
}

impl CharsetTokenizer {
    pub fn new(char_map: CharMap) -> Self {
        CharsetTokenizer {
            char_map: Arc::new(char_map),
        }
    }

    /// Build from a Sphinx charset table; unlisted characters are breaks.
    pub fn from_charset_table(table: &str) -> Result<Self> {
        Ok(Self::new(CharMap::from_charset_table(table)?))
    }

    pub fn char_map(&self) -> &CharMap {
        &self.char_map
    }
}

impl Tokenizer for CharsetTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str, options: &AnalysisOptions) -> BoxTokenStream<'a> {
        if !options.tokenize {
            return Box::new(SingleTokenStream::new(text, options));
        }
        if text.is_empty() {
            return Box::new(EmptyTokenStream::new());
        }
        Box::new(CharsetTokenStream {
            len: text.len(),
            chars: text.char_indices(),
            char_map: &self.char_map,
            buffer: String::new(),
            done: false,
            emitter: Emitter::new(options),
        })
    }

    fn name(&self) -> &'static str {
        "charset"
    }
}

struct CharsetTokenStream<'a> {
    len: usize,
    chars: CharIndices<'a>,
    char_map: &'a CharMap,
    buffer: String,
    done: bool,
    emitter: Emitter,
}

impl TokenStream for CharsetTokenStream<'_> {
    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }

        self.buffer.clear();
        let mut start = None;
        for (offset, ch) in self.chars.by_ref() {
            if self.char_map.translate_into(ch, &mut self.buffer) {
                start.get_or_insert(offset);
            } else if let Some(start) = start {
                self.emitter.emit(&self.buffer, start, offset);
                return true;
            }
        }

        self.done = true;
        match start {
            Some(start) => {
                self.emitter.emit(&self.buffer, start, self.len);
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
