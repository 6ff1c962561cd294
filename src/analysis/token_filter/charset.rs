//! Character translation filter implementation.

use std::sync::Arc;

use super::{Filter, MapTokenStream};
use crate::analysis::charmap::CharMap;
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, Token};
use crate::error::Result;

/// Translates the text of every token through a [`CharMap`].
///
/// Useful for case and accent folding. Characters the map does not list pass
/// through unchanged unless the map treats them as breaks, in which case
/// they are removed along with explicit break characters.
///
/// # Examples
///
/// ```
/// use kopis::analysis::charmap::CharMap;
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
/// use kopis::analysis::token_filter::CharsetFilter;
/// use kopis::analysis::tokenizer::RegexTokenizer;
///
/// let analyzer = (RegexTokenizer::new().unwrap() | CharsetFilter::new(CharMap::accent_folding()))
///     .build()
///     .unwrap();
/// let texts = analyzer
///     .analyze("café", &AnalysisOptions::default())
///     .unwrap()
///     .collect_texts();
/// assert_eq!(texts, vec!["cafe"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CharsetFilter {
    char_map: Arc<CharMap>,
}

impl CharsetFilter {
    pub fn new(char_map: CharMap) -> Self {
        CharsetFilter {
            char_map: Arc::new(char_map),
        }
    }

    /// Accent folding for Latin text.
    pub fn accent_folding() -> Self {
        Self::new(CharMap::accent_folding())
    }

    /// Build from a Sphinx charset table.
    pub fn from_charset_table(table: &str) -> Result<Self> {
        Ok(Self::new(CharMap::from_charset_table(table)?))
    }

    pub fn char_map(&self) -> &CharMap {
        &self.char_map
    }
}

impl Filter for CharsetFilter {
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        _options: &AnalysisOptions,
    ) -> BoxTokenStream<'a> {
        let char_map: &'a CharMap = &self.char_map;
        let mut scratch = String::new();
        Box::new(MapTokenStream::new(tokens, move |token: &mut Token| {
            scratch.clear();
            for ch in token.text.chars() {
                char_map.translate_into(ch, &mut scratch);
            }
            std::mem::swap(&mut token.text, &mut scratch);
        }))
    }

    fn name(&self) -> &'static str {
        "charset"
    }
}
