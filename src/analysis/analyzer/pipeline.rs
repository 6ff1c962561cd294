//! Pipeline analyzer that combines a tokenizer and filters.
//!
//! This is the main building block for custom analyzers. It combines a
//! tokenizer with any number of token filters, either through the typed
//! builder or through the `|` operator.
//!
//! # Architecture
//!
//! The PipelineAnalyzer applies processing in this order:
//! 1. Decoding: bytes must be valid UTF-8
//! 2. Tokenizer: Splits text into tokens
//! 3. Token Filters: Applied sequentially in the order they were added
//!
//! Every step is lazy. Nothing is tokenized until the returned stream is
//! pulled, and dropping the stream early is always safe.
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::analyzer::PipelineAnalyzer;
//! use kopis::analysis::options::AnalysisOptions;
//! use kopis::analysis::token::TokenStream;
//! use kopis::analysis::token_filter::{LowercaseFilter, StopFilter};
//! use kopis::analysis::tokenizer::RegexTokenizer;
//!
//! // Create a custom analyzer with tokenizer + filters
//! let analyzer = PipelineAnalyzer::new(RegexTokenizer::new().unwrap())
//!     .add_filter(LowercaseFilter::new())
//!     .add_filter(StopFilter::from_words(vec!["the", "and"]))
//!     .with_name("my_custom_analyzer");
//!
//! let tokens = analyzer
//!     .analyze("Hello THE world AND test", &AnalysisOptions::default())
//!     .unwrap()
//!     .collect_tokens();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "test");
//! ```

use std::fmt;
use std::ops::Index;

use crate::analysis::options::{AnalysisOptions, TextInput};
use crate::analysis::stage::{Stage, describe};
use crate::analysis::token::BoxTokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{KopisError, Result};

/// A tokenizer followed by a chain of filters.
///
/// Position 0 is always a tokenizer and every later stage is a filter.
/// Equality is structural: two pipelines are equal when their stages are.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    stages: Vec<Stage>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new<T: Tokenizer>(tokenizer: T) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            stages: vec![Stage::tokenizer(tokenizer)],
        }
    }

    /// Build a pipeline from stages, checking the stage order.
    pub fn from_stages(stages: Vec<Stage>) -> Result<Self> {
        match stages.first() {
            None => {
                return Err(KopisError::composition(
                    "an analyzer needs a tokenizer as its first stage",
                ));
            }
            Some(first) if !first.is_tokenizer() => {
                return Err(KopisError::composition(format!(
                    "the first stage of an analyzer must be a tokenizer, found {:?}: {}",
                    first.name(),
                    describe(&stages)
                )));
            }
            Some(_) => {}
        }
        if stages.iter().skip(1).any(Stage::is_tokenizer) {
            return Err(KopisError::composition(format!(
                "only one tokenizer allowed at the start of the analyzer: {}",
                describe(&stages)
            )));
        }

        Ok(PipelineAnalyzer {
            name: format!("pipeline_{}", stages[0].name()),
            stages,
        })
    }

    /// Add a filter to the pipeline.
    pub fn add_filter<F: Filter>(mut self, filter: F) -> Self {
        self.stages.push(Stage::filter(filter));
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Analyze `input` into a lazy token stream.
    ///
    /// Fails with an encoding error, before any token is produced, if the
    /// input is bytes that are not valid UTF-8. Filters marked morphological
    /// are left out when `options.skip_morphological` is set.
    pub fn analyze<'a, I>(&'a self, input: I, options: &AnalysisOptions) -> Result<BoxTokenStream<'a>>
    where
        I: Into<TextInput<'a>>,
    {
        let text = input.into().decode()?;

        let mut stages = self.stages.iter();
        let mut tokens = match stages.next().and_then(Stage::as_tokenizer) {
            Some(tokenizer) => tokenizer.tokenize(text, options),
            None => return Err(KopisError::composition("analyzer has no tokenizer")),
        };

        for filter in stages.filter_map(Stage::as_filter) {
            if options.skip_morphological && filter.is_morph() {
                continue;
            }
            tokens = filter.filter(tokens, options);
        }
        Ok(tokens)
    }

    /// Reset run-scoped state, such as stem caches, in every stage.
    pub fn clean(&self) {
        for stage in &self.stages {
            stage.clean();
        }
    }

    /// Whether any stage is or contains a morphological filter.
    pub fn has_morph(&self) -> bool {
        self.stages.iter().any(Stage::has_morph)
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> Option<&dyn Tokenizer> {
        self.stages.first().and_then(Stage::as_tokenizer)
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> impl Iterator<Item = &dyn Filter> {
        self.stages.iter().filter_map(Stage::as_filter)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// Number of stages, including the tokenizer.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub(crate) fn into_stages(self) -> Vec<Stage> {
        self.stages
    }
}

impl Index<usize> for PipelineAnalyzer {
    type Output = Stage;

    fn index(&self, index: usize) -> &Stage {
        &self.stages[index]
    }
}

impl PartialEq for PipelineAnalyzer {
    fn eq(&self, other: &Self) -> bool {
        self.stages == other.stages
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("stages", &self.stages)
            .finish()
    }
}
