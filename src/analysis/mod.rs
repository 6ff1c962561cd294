//! Text analysis module for Kopis.
//!
//! Raw text flows through a [`PipelineAnalyzer`](analyzer::PipelineAnalyzer):
//! one tokenizer followed by any number of token filters. Every stage is
//! lazy, and a single [`Token`](token::Token) record is threaded through the
//! whole chain and mutated in place.
//!
//! ```text
//! raw text → Tokenizer → Filter 1 → Filter 2 → … → consumer
//! ```
//!
//! Pipelines are composed with the `|` operator:
//!
//! ```
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::TokenStream;
//! use kopis::analysis::token_filter::{LowercaseFilter, StopFilter};
//! use kopis::analysis::tokenizer::RegexTokenizer;
//!
//! let analyzer = (RegexTokenizer::new().unwrap() | LowercaseFilter::new() | StopFilter::new())
//!     .build()
//!     .unwrap();
//!
//! let texts = analyzer
//!     .analyze("The ABC 123", &AnalysisOptions::default())
//!     .unwrap()
//!     .collect_texts();
//! assert_eq!(texts, vec!["abc", "123"]);
//! ```

pub mod analyzer;
pub mod charmap;
pub mod lang;
pub mod options;
pub mod stage;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{
    KeywordAnalyzer, LanguageAnalyzer, PipelineAnalyzer, SimpleAnalyzer, StandardAnalyzer,
    StemmingAnalyzer,
};
pub use options::{AnalysisOptions, TextInput};
pub use stage::{Chain, Stage};
pub use token::{BoxTokenStream, Token, TokenStream};
