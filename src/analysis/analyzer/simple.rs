//! Simple analyzer: regex tokenization plus lowercasing.

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::token_filter::LowercaseFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_PATTERN;
use crate::error::Result;

/// Settings for the simple preset: a [`RegexTokenizer`] and a
/// [`LowercaseFilter`].
///
/// # Examples
///
/// ```
/// use kopis::analysis::analyzer::SimpleAnalyzer;
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
///
/// let analyzer = SimpleAnalyzer::new().build().unwrap();
/// let texts = analyzer
///     .analyze("Hello there, this is a TEST", &AnalysisOptions::default())
///     .unwrap()
///     .collect_texts();
/// assert_eq!(texts, vec!["hello", "there", "this", "is", "a", "test"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleAnalyzer {
    /// Token pattern, or separator pattern when `gaps` is set.
    pub expression: String,
    /// Split on the expression instead of matching it.
    pub gaps: bool,
}

impl Default for SimpleAnalyzer {
    fn default() -> Self {
        SimpleAnalyzer {
            expression: DEFAULT_PATTERN.to_string(),
            gaps: false,
        }
    }
}

impl SimpleAnalyzer {
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

    /// Compose the pipeline.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let tokenizer = RegexTokenizer::with_pattern(&self.expression)?.gaps(self.gaps);
        Ok(PipelineAnalyzer::new(tokenizer)
            .add_filter(LowercaseFilter::new())
            .with_name("simple"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::options::AnalysisOptions;
    use crate::analysis::token::TokenStream;

    #[test]
    fn test_simple_analyzer() {
        let texts = SimpleAnalyzer::new()
            .build()
            .unwrap()
            .analyze("Hello there, this is a TEST", &AnalysisOptions::default())
            .unwrap()
            .collect_texts();
        assert_eq!(texts, vec!["hello", "there", "this", "is", "a", "test"]);
    }

    #[test]
    fn test_gaps() {
        let texts = SimpleAnalyzer::new()
            .expression(r"\s*;\s*")
            .gaps(true)
            .build()
            .unwrap()
            .analyze("Red Wine; White Wine ;Rosé", &AnalysisOptions::default())
            .unwrap()
            .collect_texts();
        assert_eq!(texts, vec!["red wine", "white wine", "rosé"]);
    }

    #[test]
    fn test_invalid_expression() {
        assert!(SimpleAnalyzer::new().expression("[").build().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let analyzer: SimpleAnalyzer = serde_json::from_str(r#"{"gaps": true}"#).unwrap();
        assert!(analyzer.gaps);
        assert_eq!(analyzer.expression, DEFAULT_PATTERN);
    }
}
