//! Per-call analysis options and raw input handling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{KopisError, Result};

/// Options for a single analyzer invocation.
///
/// Tokenizers read these to initialise the shared token record; filters
/// receive the same options as call-time context.
///
/// # Examples
///
/// ```
/// use kopis::analysis::options::AnalysisOptions;
///
/// let options = AnalysisOptions::query().with_positions(true);
/// assert_eq!(options.mode, "query");
/// assert!(options.remove_stopwords);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Record token positions.
    pub positions: bool,
    /// Record byte offsets into the source text.
    pub chars: bool,
    /// Keep the unfiltered token text in `original_text`.
    pub keep_original: bool,
    /// Drop stopped tokens instead of marking them.
    pub remove_stopwords: bool,
    /// Position of the first token.
    pub start_pos: usize,
    /// Offset added to every reported byte offset.
    pub start_char: usize,
    /// Purpose of the call, e.g. `"index"` or `"query"`.
    pub mode: String,
    /// When false, the whole input is emitted as a single token.
    pub tokenize: bool,
    /// Skip morphological filters such as stemming.
    pub skip_morphological: bool,
    /// Extra flags copied into every token.
    pub attributes: BTreeMap<String, String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            positions: false,
            chars: false,
            keep_original: false,
            remove_stopwords: true,
            start_pos: 0,
            start_char: 0,
            mode: String::new(),
            tokenize: true,
            skip_morphological: false,
            attributes: BTreeMap::new(),
        }
    }
}

impl AnalysisOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for indexing: mode `"index"` with positions recorded.
    pub fn index() -> Self {
        Self::default().with_mode("index").with_positions(true)
    }

    /// Options for query parsing: mode `"query"`.
    pub fn query() -> Self {
        Self::default().with_mode("query")
    }

    pub fn with_positions(mut self, positions: bool) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_chars(mut self, chars: bool) -> Self {
        self.chars = chars;
        self
    }

    pub fn with_keep_original(mut self, keep_original: bool) -> Self {
        self.keep_original = keep_original;
        self
    }

    pub fn with_remove_stopwords(mut self, remove_stopwords: bool) -> Self {
        self.remove_stopwords = remove_stopwords;
        self
    }

    pub fn with_start_pos(mut self, start_pos: usize) -> Self {
        self.start_pos = start_pos;
        self
    }

    pub fn with_start_char(mut self, start_char: usize) -> Self {
        self.start_char = start_char;
        self
    }

    pub fn with_mode<S: Into<String>>(mut self, mode: S) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_tokenize(mut self, tokenize: bool) -> Self {
        self.tokenize = tokenize;
        self
    }

    pub fn with_skip_morphological(mut self, skip: bool) -> Self {
        self.skip_morphological = skip;
        self
    }

    /// Add a flag to the extension bag of every token.
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Raw analyzer input: text, or bytes that must decode as UTF-8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextInput<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> TextInput<'a> {
    /// Decode into text, failing with an encoding error on invalid UTF-8.
    pub fn decode(self) -> Result<&'a str> {
        match self {
            TextInput::Text(text) => Ok(text),
            TextInput::Bytes(bytes) => std::str::from_utf8(bytes).map_err(|e| {
                KopisError::encoding(format!("input is not valid UTF-8: {e}"))
            }),
        }
    }
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(text: &'a str) -> Self {
        TextInput::Text(text)
    }
}

impl<'a> From<&'a String> for TextInput<'a> {
    fn from(text: &'a String) -> Self {
        TextInput::Text(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for TextInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        TextInput::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for TextInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        TextInput::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a Vec<u8>> for TextInput<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        TextInput::Bytes(bytes.as_slice())
    }
}
