//! # Kopis
//!
//! Composable text analysis for full-text search.
//!
//! ## Features
//!
//! - Lazy, single-record token streams
//! - Regex, ID, path and character-map tokenizers
//! - Lowercase, strip, stop-word, charset, logging, stemming and
//!   mode-dispatching filters
//! - Pipelines composed with the `|` operator or a typed builder
//! - Keyword, simple, standard, stemming and language presets
//!
//! ```
//! use kopis::prelude::*;
//!
//! let analyzer = (RegexTokenizer::new().unwrap() | LowercaseFilter::new() | StopFilter::new())
//!     .build()
//!     .unwrap();
//! let texts = analyzer
//!     .analyze("The Quick Brown Fox", &AnalysisOptions::default())
//!     .unwrap()
//!     .collect_texts();
//! assert_eq!(texts, vec!["quick", "brown", "fox"]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;

pub mod prelude {
    pub use crate::analysis::analyzer::{
        KeywordAnalyzer, LanguageAnalyzer, PipelineAnalyzer, SimpleAnalyzer, StandardAnalyzer,
        StemmingAnalyzer, StopWords,
    };
    pub use crate::analysis::options::{AnalysisOptions, TextInput};
    pub use crate::analysis::stage::{Chain, Stage};
    pub use crate::analysis::token::{BoxTokenStream, Token, TokenStream};
    pub use crate::analysis::token_filter::{
        CharsetFilter, Filter, LoggingFilter, LowercaseFilter, MultiFilter, PassFilter,
        StemFilter, StopFilter, StripFilter,
    };
    pub use crate::analysis::tokenizer::{
        CharsetTokenizer, IdTokenizer, PathTokenizer, RegexTokenizer, Tokenizer,
    };
    pub use crate::config::{AnalyzerConfig, KopisConfig};
    pub use crate::error::{KopisError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
