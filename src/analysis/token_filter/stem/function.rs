//! Stemmer backed by a plain function.

use std::fmt;
use std::sync::Arc;

use super::Stemmer;

type StemFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Wraps a function as a [`Stemmer`].
///
/// Stem filters holding a function stemmer compare equal only when they share
/// the same stemmer instance.
///
/// # Examples
///
/// ```
/// use kopis::analysis::token_filter::{FnStemmer, Stemmer};
///
/// let stemmer = FnStemmer::new("strip-ing", |word: &str| {
///     word.strip_suffix("ing").unwrap_or(word).to_string()
/// });
/// assert_eq!(stemmer.stem("walking"), "walk");
/// ```
#[derive(Clone)]
pub struct FnStemmer {
    name: &'static str,
    func: StemFn,
}

impl FnStemmer {
    pub fn new<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        FnStemmer {
            name,
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for FnStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStemmer").field("name", &self.name).finish()
    }
}

impl Stemmer for FnStemmer {
    fn stem(&self, word: &str) -> String {
        (self.func)(word)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
