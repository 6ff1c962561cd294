//! Keyword analyzer for whitespace- or comma-separated values.
//!
//! Tokens keep their punctuation, which suits tag and keyword fields where
//! values should be matched as written.
//!
//! # Use Cases
//!
//! - Tag fields where exact matching is required
//! - Comma-separated category lists
//! - Email addresses or URLs that should be treated atomically
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::analyzer::KeywordAnalyzer;
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::TokenStream;
//!
//! let analyzer = KeywordAnalyzer::new().build().unwrap();
//! let texts = analyzer
//!     .analyze("Hello there, this is a TEST", &AnalysisOptions::default())
//!     .unwrap()
//!     .collect_texts();
//!
//! assert_eq!(texts, vec!["Hello", "there,", "this", "is", "a", "TEST"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::stage::Chain;
use crate::analysis::token_filter::LowercaseFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::Result;

/// Settings for the keyword preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordAnalyzer {
    /// Lowercase every token.
    pub lowercase: bool,
    /// Split on commas (and strip whitespace) instead of on whitespace.
    pub commas: bool,
}

impl KeywordAnalyzer {
    /// Whitespace-separated, case-preserving keywords.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn commas(mut self, commas: bool) -> Self {
        self.commas = commas;
        self
    }

    /// Compose the pipeline.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let mut chain = if self.commas {
            RegexTokenizer::comma_separated()?
        } else {
            Chain::from(RegexTokenizer::space_separated()?)
        };
        if self.lowercase {
            chain = chain | LowercaseFilter::new();
        }
        Ok(chain.build()?.with_name("keyword"))
    }
}
