//! Standard analyzer that provides good defaults for most use cases.
//!
//! This analyzer uses a regex tokenizer, lowercase normalization, and English
//! stop word filtering. It's suitable for general text analysis in English
//! and other languages that use spaces to separate words.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer
//! 2. LowercaseFilter
//! 3. StopFilter (34 common English stop words, minimum length 2), optional
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::analyzer::StandardAnalyzer;
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::TokenStream;
//!
//! let analyzer = StandardAnalyzer::new().build().unwrap();
//! let texts = analyzer
//!     .analyze("Testing is testing and testing", &AnalysisOptions::default())
//!     .unwrap()
//!     .collect_texts();
//!
//! // "is" and "and" are filtered out as stop words
//! assert_eq!(texts, vec!["testing", "testing", "testing"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{PipelineAnalyzer, StopWords};
use crate::analysis::token_filter::LowercaseFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_PATTERN;
use crate::error::Result;

/// Settings for the standard preset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardAnalyzer {
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
}

impl Default for StandardAnalyzer {
    fn default() -> Self {
        StandardAnalyzer {
            expression: DEFAULT_PATTERN.to_string(),
            gaps: false,
            stop_words: StopWords::Default,
            min_size: 2,
            max_size: None,
        }
    }
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
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

    /// Leave out the stop filter entirely.
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

    /// Compose the pipeline.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let tokenizer = RegexTokenizer::with_pattern(&self.expression)?.gaps(self.gaps);
        let mut analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(LowercaseFilter::new())
            .with_name("standard");

        if let Some(stop) = self.stop_words.stop_filter(self.min_size, self.max_size) {
            analyzer = analyzer.add_filter(stop);
        }
        Ok(analyzer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::options::AnalysisOptions;
    use crate::analysis::token::TokenStream;

    fn analyze(analyzer: &StandardAnalyzer, text: &str) -> Vec<String> {
        analyzer
            .build()
            .unwrap()
            .analyze(text, &AnalysisOptions::default())
            .unwrap()
            .collect_texts()
    }

    #[test]
    fn test_standard_analyzer() {
        let texts = analyze(&StandardAnalyzer::new(), "Hello the world and test");

        // "the" and "and" should be filtered out
        assert_eq!(texts, vec!["hello", "world", "test"]);
    }

    #[test]
    fn test_without_stop_words() {
        let texts = analyze(&StandardAnalyzer::new().without_stop_words(), "Hello the world and a test");
        assert_eq!(texts, vec!["hello", "the", "world", "and", "a", "test"]);

        let analyzer = StandardAnalyzer::new().without_stop_words().build().unwrap();
        assert_eq!(analyzer.len(), 2);
    }

    #[test]
    fn test_size_limits() {
        let analyzer = StandardAnalyzer::new()
            .stop_words(StopWords::Words(Default::default()))
            .min_size(3)
            .max_size(Some(5));
        let texts = analyze(&analyzer, "go far enough and wide");
        assert_eq!(texts, vec!["far", "and", "wide"]);
    }

    #[test]
    fn test_language_stop_words() {
        let analyzer = StandardAnalyzer::new().stop_words(StopWords::Language("fr".into()));
        let texts = analyze(&analyzer, "le chat et la souris");
        assert_eq!(texts, vec!["chat", "souris"]);
    }

    #[test]
    fn test_unknown_stop_language_is_omitted() {
        let analyzer = StandardAnalyzer::new()
            .stop_words(StopWords::Language("xx".into()))
            .build()
            .unwrap();
        assert_eq!(analyzer.len(), 2);

        let texts = analyzer
            .analyze("The cat", &AnalysisOptions::default())
            .unwrap()
            .collect_texts();
        assert_eq!(texts, vec!["the", "cat"]);
    }

    #[test]
    fn test_positions_survive_stopping() {
        let analyzer = StandardAnalyzer::new().build().unwrap();
        let options = AnalysisOptions::default().with_positions(true);
        let tokens = analyzer.analyze("the quick fox", &options).unwrap().collect_tokens();
        let positions: Vec<Option<usize>> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![Some(1), Some(2)]);
    }
}
