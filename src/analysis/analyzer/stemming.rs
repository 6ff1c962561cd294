//! Stemming analyzer: the standard pipeline followed by a stem filter.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer
//! 2. LowercaseFilter
//! 3. StopFilter, optional
//! 4. StemFilter (Snowball, English unless a language is given)
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::analyzer::StemmingAnalyzer;
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::TokenStream;
//!
//! let analyzer = StemmingAnalyzer::new().build().unwrap();
//! let texts = analyzer
//!     .analyze("Testing is testing and testing", &AnalysisOptions::default())
//!     .unwrap()
//!     .collect_texts();
//! assert_eq!(texts, vec!["test", "test", "test"]);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{PipelineAnalyzer, StopWords};
use crate::analysis::token_filter::stem::DEFAULT_CACHE_SIZE;
use crate::analysis::token_filter::{LowercaseFilter, StemFilter, Stemmer};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_PATTERN;
use crate::error::Result;

/// Settings for the stemming preset.
///
/// A custom [`Stemmer`] can be installed with [`StemmingAnalyzer::stemmer`];
/// it takes precedence over `language` and is not serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StemmingAnalyzer {
    /// Token pattern, or separator pattern when `gaps` is set.
    pub expression: String,
    /// Split on the expression instead of matching it.
    pub gaps: bool,
    /// Which stop words to remove, if any.
    pub stop_words: StopWords,
    /// Words shorter than this are removed.
    pub min_size: usize,
    /// Words longer than this are removed.
    pub max_size: Option<usize>,
    /// Snowball language code. Unknown codes fall back to English.
    pub language: Option<String>,
    /// Words passed through unstemmed.
    pub ignore: BTreeSet<String>,
    /// Stem cache bound, `None` to disable.
    pub cache_size: Option<usize>,
    #[serde(skip)]
    custom: Option<Arc<dyn Stemmer>>,
}

impl Default for StemmingAnalyzer {
    fn default() -> Self {
        StemmingAnalyzer {
            expression: DEFAULT_PATTERN.to_string(),
            gaps: false,
            stop_words: StopWords::Default,
            min_size: 2,
            max_size: None,
            language: None,
            ignore: BTreeSet::new(),
            cache_size: Some(DEFAULT_CACHE_SIZE),
            custom: None,
        }
    }
}

impl StemmingAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression<S: Into<String>>(mut self, expression: S) -> Self {
        self.expression = expression.into();
        self
    }

    pub fn gaps(mut self, gaps: bool) -> Self {
        self.gaps = gaps;
        self
    }

    pub fn stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn without_stop_words(self) -> Self {
        self.stop_words(StopWords::Disabled)
    }

    pub fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn max_size(mut self, max_size: Option<usize>) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn language<S: Into<String>>(mut self, code: S) -> Self {
        self.language = Some(code.into());
        self
    }

    pub fn ignore<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn cache_size(mut self, cache_size: Option<usize>) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Use a custom stemming function instead of Snowball.
    pub fn stemmer<S: Stemmer + 'static>(mut self, stemmer: S) -> Self {
        self.custom = Some(Arc::new(stemmer));
        self
    }

    fn stem_filter(&self) -> StemFilter {
        let filter = match (&self.custom, &self.language) {
            (Some(stemmer), _) => StemFilter::with_shared_stemmer(Arc::clone(stemmer)),
            (None, Some(code)) => StemFilter::with_language_or_default(code),
            (None, None) => StemFilter::new(),
        };
        filter
            .ignore(self.ignore.iter().cloned())
            .cache_size(self.cache_size)
    }

    /// Compose the pipeline.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let tokenizer = RegexTokenizer::with_pattern(&self.expression)?.gaps(self.gaps);
        let mut analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(LowercaseFilter::new())
            .with_name("stemming");

        if let Some(stop) = self.stop_words.stop_filter(self.min_size, self.max_size) {
            analyzer = analyzer.add_filter(stop);
        }
        Ok(analyzer.add_filter(self.stem_filter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lang::Language;
    use crate::analysis::options::AnalysisOptions;
    use crate::analysis::token::TokenStream;
    use crate::analysis::token_filter::FnStemmer;

    fn analyze(analyzer: &StemmingAnalyzer, text: &str) -> Vec<String> {
        analyzer
            .build()
            .unwrap()
            .analyze(text, &AnalysisOptions::default())
            .unwrap()
            .collect_texts()
    }

    #[test]
    fn test_stemming_analyzer() {
        assert_eq!(
            analyze(&StemmingAnalyzer::new(), "Testing is testing and testing"),
            vec!["test", "test", "test"]
        );
        assert_eq!(
            analyze(&StemmingAnalyzer::new(), "fundamentally willows"),
            vec!["fundament", "willow"]
        );
    }

    #[test]
    fn test_ignore() {
        let analyzer = StemmingAnalyzer::new().ignore(["willows"]);
        assert_eq!(analyze(&analyzer, "running willows"), vec!["run", "willows"]);
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let analyzer = StemmingAnalyzer::new().language("xx").build().unwrap();
        let stem = analyzer[3].downcast_ref::<StemFilter>().unwrap();
        assert_eq!(stem.stemmer().language(), Some(Language::English));
    }

    #[test]
    fn test_missing_stop_list_omits_stop_stage() {
        let analyzer = StemmingAnalyzer::new()
            .language("ta")
            .stop_words(StopWords::Language("ta".into()))
            .build()
            .unwrap();
        let names: Vec<&str> = analyzer.stages().iter().map(|stage| stage.name()).collect();
        assert_eq!(names, vec!["regex", "lowercase", "stem"]);

        let stem = analyzer[2].downcast_ref::<StemFilter>().unwrap();
        assert_eq!(stem.stemmer().language(), Some(Language::Tamil));
    }

    #[test]
    fn test_custom_stemmer() {
        let analyzer = StemmingAnalyzer::new()
            .without_stop_words()
            .stemmer(FnStemmer::new("truncate", |word: &str| word.chars().take(3).collect()));
        assert_eq!(analyze(&analyzer, "Searching the index"), vec!["sea", "the", "ind"]);
    }

    #[test]
    fn test_skip_morphological() {
        let analyzer = StemmingAnalyzer::new().build().unwrap();
        let options = AnalysisOptions::default().with_skip_morphological(true);
        let texts = analyzer.analyze("running dogs", &options).unwrap().collect_texts();
        assert_eq!(texts, vec!["running", "dogs"]);
    }

    #[test]
    fn test_deserialize() {
        let analyzer: StemmingAnalyzer =
            serde_json::from_str(r#"{"language": "de", "stop_words": "disabled", "cache_size": null}"#)
                .unwrap();
        assert_eq!(analyzer.language.as_deref(), Some("de"));
        assert_eq!(analyzer.cache_size, None);
        assert_eq!(analyzer.build().unwrap().len(), 3);
    }
}
