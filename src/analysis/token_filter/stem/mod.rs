//! Stemming token filter and stemmer implementations.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

use super::{Filter, MapTokenStream};
use crate::analysis::lang::{self, Language};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, Token};

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync + fmt::Debug {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;

    /// The language this stemmer is for, if it is language specific.
    fn language(&self) -> Option<Language> {
        None
    }
}

// Stemmer implementations
pub mod function;
pub mod snowball;

// Re-export stemmers
pub use function::FnStemmer;
pub use snowball::SnowballStemmer;

/// Default number of cached stems before the cache is flushed.
pub const DEFAULT_CACHE_SIZE: usize = 50_000;

/// Filter that applies stemming to tokens.
///
/// Stopped tokens and words in the ignore set are left alone. Stems are
/// memoized in a bounded cache that is flushed when full and emptied by
/// [`Filter::clean`].
///
/// # Examples
///
/// ```
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
/// use kopis::analysis::token_filter::StemFilter;
/// use kopis::analysis::tokenizer::RegexTokenizer;
///
/// let analyzer = (RegexTokenizer::new().unwrap() | StemFilter::new()).build().unwrap();
/// let texts = analyzer
///     .analyze("fundamentally willows", &AnalysisOptions::default())
///     .unwrap()
///     .collect_texts();
/// assert_eq!(texts, vec!["fundament", "willow"]);
/// ```
pub struct StemFilter {
    /// The stemmer to use.
    stemmer: Arc<dyn Stemmer>,
    ignore: HashSet<String>,
    cache_size: Option<usize>,
    cache: Mutex<AHashMap<String, String>>,
}

impl StemFilter {
    /// Create a new stem filter with the English Snowball stemmer.
    pub fn new() -> Self {
        Self::with_stemmer(SnowballStemmer::new(Language::English))
    }

    /// Create a stem filter for a language code.
    ///
    /// Returns `None` if no stemmer is available for `code`.
    pub fn for_language(code: &str) -> Option<Self> {
        lang::stemmer(code).map(Self::with_stemmer)
    }

    /// Create a stem filter for a language code, falling back to English.
    pub fn with_language_or_default(code: &str) -> Self {
        Self::for_language(code).unwrap_or_else(|| {
            log::debug!("no stemmer for language {code:?}, using english");
            Self::new()
        })
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer<S: Stemmer + 'static>(stemmer: S) -> Self {
        Self::with_shared_stemmer(Arc::new(stemmer))
    }

    /// Create a stem filter around a shared stemmer.
    pub fn with_shared_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter {
            stemmer,
            ignore: HashSet::new(),
            cache_size: Some(DEFAULT_CACHE_SIZE),
            cache: Mutex::new(AHashMap::new()),
        }
    }

    /// Leave these words unstemmed.
    pub fn ignore<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(words.into_iter().map(Into::into));
        self
    }

    /// Bound the stem cache. `None` or `Some(0)` disables caching.
    pub fn cache_size(mut self, cache_size: Option<usize>) -> Self {
        self.cache_size = cache_size.filter(|size| *size > 0);
        self
    }

    pub fn stemmer(&self) -> &dyn Stemmer {
        self.stemmer.as_ref()
    }

    /// Number of cached stems.
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }

    /// Stem `word`, consulting the cache.
    pub fn stem(&self, word: &str) -> String {
        let Some(limit) = self.cache_size else {
            return self.stemmer.stem(word);
        };

        if let Some(stemmed) = self.cache.lock().get(word) {
            return stemmed.clone();
        }

        let stemmed = self.stemmer.stem(word);
        let mut cache = self.cache.lock();
        if cache.len() >= limit {
            cache.clear();
        }
        cache.insert(word.to_string(), stemmed.clone());
        stemmed
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StemFilter {
    fn clone(&self) -> Self {
        StemFilter {
            stemmer: Arc::clone(&self.stemmer),
            ignore: self.ignore.clone(),
            cache_size: self.cache_size,
            cache: Mutex::new(AHashMap::new()),
        }
    }
}

impl PartialEq for StemFilter {
    fn eq(&self, other: &Self) -> bool {
        let same_stemmer = match (self.stemmer.language(), other.stemmer.language()) {
            (Some(a), Some(b)) => a == b && self.stemmer.name() == other.stemmer.name(),
            (None, None) => Arc::ptr_eq(&self.stemmer, &other.stemmer),
            _ => false,
        };
        same_stemmer
            && self.ignore == other.ignore
            && self.cache_size == other.cache_size
    }
}

impl fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer)
            .field("ignore", &self.ignore)
            .field("cache_size", &self.cache_size)
            .finish()
    }
}

impl Filter for StemFilter {
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        _options: &AnalysisOptions,
    ) -> BoxTokenStream<'a> {
        Box::new(MapTokenStream::new(tokens, move |token: &mut Token| {
            if token.stopped || self.ignore.contains(&token.text) {
                return;
            }
            token.text = self.stem(&token.text);
        }))
    }

    fn name(&self) -> &'static str {
        "stem"
    }

    fn is_morph(&self) -> bool {
        true
    }

    fn clean(&self) {
        self.cache.lock().clear();
    }
}
