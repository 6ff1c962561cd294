//! Language-specific analyzer.
//!
//! Combines the regex tokenizer and lowercasing with the stop list and
//! Snowball stemmer for one language. Either of the last two is left out
//! when the language has none; neither is an error.
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::analyzer::LanguageAnalyzer;
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::TokenStream;
//!
//! let analyzer = LanguageAnalyzer::new("es").build().unwrap();
//! let texts = analyzer
//!     .analyze("Por el mar corren las liebres", &AnalysisOptions::default())
//!     .unwrap()
//!     .collect_texts();
//! assert_eq!(texts, vec!["mar", "corr", "liebr"]);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::token_filter::{LowercaseFilter, StemFilter, StopFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_PATTERN;
use crate::error::Result;

/// Settings for the language preset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageAnalyzer {
    /// Language code or name, such as `"es"`, `"pt-BR"` or `"german"`.
    pub language: String,
    pub expression: String,
    pub gaps: bool,
    /// Words passed through unstemmed.
    pub ignore: BTreeSet<String>,
}

impl Default for LanguageAnalyzer {
    fn default() -> Self {
        LanguageAnalyzer::new("en")
    }
}

impl LanguageAnalyzer {
    pub fn new<S: Into<String>>(language: S) -> Self {
        LanguageAnalyzer {
            language: language.into(),
            expression: DEFAULT_PATTERN.to_string(),
            gaps: false,
            ignore: BTreeSet::new(),
        }
    }

    pub fn expression<S: Into<String>>(mut self, expression: S) -> Self {
        self.expression = expression.into();
        self
    }

    pub fn gaps(mut self, gaps: bool) -> Self {
        self.gaps = gaps;
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

    /// Compose the pipeline.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let tokenizer = RegexTokenizer::with_pattern(&self.expression)?.gaps(self.gaps);
        let mut analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(LowercaseFilter::new())
            .with_name(format!("language_{}", self.language));

        match StopFilter::for_language(&self.language) {
            Some(stop) => analyzer = analyzer.add_filter(stop),
            None => log::debug!("no stop words for language {:?}", self.language),
        }
        match StemFilter::for_language(&self.language) {
            Some(stem) => analyzer = analyzer.add_filter(stem.ignore(self.ignore.iter().cloned())),
            None => log::debug!("no stemmer for language {:?}", self.language),
        }
        Ok(analyzer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::options::AnalysisOptions;
    use crate::analysis::token::TokenStream;

    fn stage_names(analyzer: &PipelineAnalyzer) -> Vec<&str> {
        analyzer.stages().iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_spanish() {
        let analyzer = LanguageAnalyzer::new("es").build().unwrap();
        assert_eq!(stage_names(&analyzer), vec!["regex", "lowercase", "stop", "stem"]);

        let texts = analyzer
            .analyze("Por el mar corren las liebres", &AnalysisOptions::default())
            .unwrap()
            .collect_texts();
        assert_eq!(texts, vec!["mar", "corr", "liebr"]);
    }

    #[test]
    fn test_region_suffix() {
        let analyzer = LanguageAnalyzer::new("en-US").build().unwrap();
        assert_eq!(stage_names(&analyzer), vec!["regex", "lowercase", "stop", "stem"]);
    }

    #[test]
    fn test_unknown_language_omits_stages() {
        let analyzer = LanguageAnalyzer::new("xx").build().unwrap();
        assert_eq!(stage_names(&analyzer), vec!["regex", "lowercase"]);

        let texts = analyzer
            .analyze("Plain Words", &AnalysisOptions::default())
            .unwrap()
            .collect_texts();
        assert_eq!(texts, vec!["plain", "words"]);
    }

    #[test]
    fn test_stemmer_without_stop_words() {
        let analyzer = LanguageAnalyzer::new("ta").build().unwrap();
        assert_eq!(stage_names(&analyzer), vec!["regex", "lowercase", "stem"]);
    }

    #[test]
    fn test_ignore() {
        let analyzer = LanguageAnalyzer::new("en").ignore(["running"]).build().unwrap();
        let texts = analyzer
            .analyze("running jumping", &AnalysisOptions::default())
            .unwrap()
            .collect_texts();
        assert_eq!(texts, vec!["running", "jump"]);
    }
}
