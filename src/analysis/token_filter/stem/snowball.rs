//! Snowball stemmers from the `rust-stemmers` crate.

use std::fmt;

use super::Stemmer;
use crate::analysis::lang::Language;

/// A Snowball stemmer for one language.
pub struct SnowballStemmer {
    language: Language,
    stemmer: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn new(language: Language) -> Self {
        SnowballStemmer {
            language,
            stemmer: rust_stemmers::Stemmer::create(language.algorithm()),
        }
    }

    /// The English (Porter2) stemmer.
    pub fn english() -> Self {
        Self::new(Language::English)
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl Clone for SnowballStemmer {
    fn clone(&self) -> Self {
        Self::new(self.language)
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    fn name(&self) -> &'static str {
        "snowball"
    }

    fn language(&self) -> Option<Language> {
        Some(self.language)
    }
}
