//! Pipeline stages and the `|` composition operator.
//!
//! A [`Stage`] is either a tokenizer or a filter. Chaining stages with `|`
//! produces a [`Chain`], which flattens nested pipelines and records the first
//! composition error. [`Chain::build`] turns it into a
//! [`PipelineAnalyzer`], reporting that error if there was one.
//!
//! ```
//! use kopis::analysis::token_filter::LowercaseFilter;
//! use kopis::analysis::tokenizer::{IdTokenizer, RegexTokenizer};
//!
//! // Tokenizers may only start a chain.
//! let err = (RegexTokenizer::new().unwrap() | LowercaseFilter::new() | IdTokenizer::new())
//!     .build()
//!     .unwrap_err();
//! assert!(err.is_composition());
//! ```

use std::any::Any;
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::token_filter::{
    CharsetFilter, Filter, LoggingFilter, LowercaseFilter, MultiFilter, PassFilter, StemFilter,
    StopFilter, StripFilter,
};
use crate::analysis::tokenizer::{
    CharsetTokenizer, IdTokenizer, PathTokenizer, RegexTokenizer, Tokenizer,
};
use crate::error::{KopisError, Result};

/// Structural equality across stage trait objects.
///
/// Implemented for every `PartialEq + 'static` type, so stage types only need
/// to derive or implement `PartialEq`.
pub trait StageEq: Any {
    /// The stage as `Any`, for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// True if `other` is the same concrete type with equal configuration.
    fn stage_eq(&self, other: &dyn Any) -> bool;
}

impl<T: PartialEq + Any> StageEq for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn stage_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

impl PartialEq for dyn Tokenizer {
    fn eq(&self, other: &Self) -> bool {
        self.stage_eq(other.as_any())
    }
}

impl PartialEq for dyn Filter {
    fn eq(&self, other: &Self) -> bool {
        self.stage_eq(other.as_any())
    }
}

/// One step of an analysis pipeline.
#[derive(Clone)]
pub enum Stage {
    Tokenizer(Arc<dyn Tokenizer>),
    Filter(Arc<dyn Filter>),
}

impl Stage {
    /// Wrap a tokenizer.
    pub fn tokenizer<T: Tokenizer>(tokenizer: T) -> Self {
        Stage::Tokenizer(Arc::new(tokenizer))
    }

    /// Wrap a filter.
    pub fn filter<F: Filter>(filter: F) -> Self {
        Stage::Filter(Arc::new(filter))
    }

    /// Whether this stage is a tokenizer.
    pub fn is_tokenizer(&self) -> bool {
        matches!(self, Stage::Tokenizer(_))
    }

    /// Whether this stage is a morphological filter.
    pub fn is_morph(&self) -> bool {
        match self {
            Stage::Tokenizer(_) => false,
            Stage::Filter(filter) => filter.is_morph(),
        }
    }

    /// Whether this stage is or contains a morphological filter.
    pub fn has_morph(&self) -> bool {
        match self {
            Stage::Tokenizer(_) => false,
            Stage::Filter(filter) => filter.has_morph(),
        }
    }

    /// The stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Tokenizer(tokenizer) => tokenizer.name(),
            Stage::Filter(filter) => filter.name(),
        }
    }

    /// Reset run-scoped state held by the stage.
    pub fn clean(&self) {
        match self {
            Stage::Tokenizer(tokenizer) => tokenizer.clean(),
            Stage::Filter(filter) => filter.clean(),
        }
    }

    /// The tokenizer, if this is a tokenizer stage.
    pub fn as_tokenizer(&self) -> Option<&dyn Tokenizer> {
        match self {
            Stage::Tokenizer(tokenizer) => Some(tokenizer.as_ref()),
            Stage::Filter(_) => None,
        }
    }

    /// The filter, if this is a filter stage.
    pub fn as_filter(&self) -> Option<&dyn Filter> {
        match self {
            Stage::Tokenizer(_) => None,
            Stage::Filter(filter) => Some(filter.as_ref()),
        }
    }

    /// Downcast the stage to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Stage::Tokenizer(tokenizer) => tokenizer.as_ref().as_any().downcast_ref(),
            Stage::Filter(filter) => filter.as_ref().as_any().downcast_ref(),
        }
    }
}

impl PartialEq for Stage {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Stage::Tokenizer(a), Stage::Tokenizer(b)) => **a == **b,
            (Stage::Filter(a), Stage::Filter(b)) => **a == **b,
            _ => false,
        }
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Tokenizer(tokenizer) => fmt::Debug::fmt(tokenizer, f),
            Stage::Filter(filter) => fmt::Debug::fmt(filter, f),
        }
    }
}

impl From<Arc<dyn Tokenizer>> for Stage {
    fn from(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Stage::Tokenizer(tokenizer)
    }
}

impl From<Arc<dyn Filter>> for Stage {
    fn from(filter: Arc<dyn Filter>) -> Self {
        Stage::Filter(filter)
    }
}

/// An in-progress composition built with `|`.
///
/// Composing never panics: an illegal ordering is recorded and reported by
/// [`build`](Self::build). Composing with a pipeline or another chain splices
/// its stages in place.
#[derive(Clone, Debug, Default)]
pub struct Chain {
    stages: Vec<Stage>,
    error: Option<String>,
}

impl Chain {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rhs`, flattening it into this chain.
    pub fn then<R: Into<Chain>>(mut self, rhs: R) -> Self {
        let rhs = rhs.into();
        if self.error.is_none() {
            self.error = rhs.error;
        }
        self.stages.extend(rhs.stages);

        if self.error.is_none() && self.stages.iter().skip(1).any(Stage::is_tokenizer) {
            self.error = Some(format!(
                "only one tokenizer allowed at the start of the analyzer: {}",
                describe(&self.stages)
            ));
        }
        self
    }

    /// The stages composed so far.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The first composition error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Finish the composition.
    ///
    /// Fails with a composition error if a tokenizer appeared after the first
    /// position, or if the chain does not start with a tokenizer.
    pub fn build(self) -> Result<PipelineAnalyzer> {
        if let Some(error) = self.error {
            return Err(KopisError::composition(error));
        }
        PipelineAnalyzer::from_stages(self.stages)
    }
}

impl TryFrom<Chain> for PipelineAnalyzer {
    type Error = KopisError;

    fn try_from(chain: Chain) -> Result<Self> {
        chain.build()
    }
}

impl From<Stage> for Chain {
    fn from(stage: Stage) -> Self {
        Chain {
            stages: vec![stage],
            error: None,
        }
    }
}

impl From<PipelineAnalyzer> for Chain {
    fn from(pipeline: PipelineAnalyzer) -> Self {
        Chain {
            stages: pipeline.into_stages(),
            error: None,
        }
    }
}

impl<R: Into<Chain>> BitOr<R> for Chain {
    type Output = Chain;

    fn bitor(self, rhs: R) -> Chain {
        self.then(rhs)
    }
}

impl<R: Into<Chain>> BitOr<R> for Stage {
    type Output = Chain;

    fn bitor(self, rhs: R) -> Chain {
        Chain::from(self).then(rhs)
    }
}

impl<R: Into<Chain>> BitOr<R> for PipelineAnalyzer {
    type Output = Chain;

    fn bitor(self, rhs: R) -> Chain {
        Chain::from(self).then(rhs)
    }
}

/// Render stage names for error messages, e.g. `[regex, lowercase, id]`.
pub(crate) fn describe(stages: &[Stage]) -> String {
    let names: Vec<&str> = stages.iter().map(Stage::name).collect();
    format!("[{}]", names.join(", "))
}

macro_rules! composable {
    ($variant:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Stage {
                fn from(stage: $ty) -> Self {
                    Stage::$variant(Arc::new(stage))
                }
            }

            impl From<$ty> for Chain {
                fn from(stage: $ty) -> Self {
                    Chain::from(Stage::from(stage))
                }
            }

            impl<R: Into<Chain>> BitOr<R> for $ty {
                type Output = Chain;

                fn bitor(self, rhs: R) -> Chain {
                    Chain::from(self).then(rhs)
                }
            }
        )+
    };
}

composable!(Tokenizer: RegexTokenizer, IdTokenizer, PathTokenizer, CharsetTokenizer);
composable!(
    Filter: PassFilter,
    LowercaseFilter,
    StripFilter,
    StopFilter,
    MultiFilter,
    CharsetFilter,
    LoggingFilter,
    StemFilter,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_flattens_pipelines() {
        let left = (RegexTokenizer::new().unwrap() | LowercaseFilter::new())
            .build()
            .unwrap();
        let chain = left | StopFilter::new();

        assert!(chain.error().is_none());
        let names: Vec<&str> = chain.stages().iter().map(Stage::name).collect();
        assert_eq!(names, vec!["regex", "lowercase", "stop"]);
    }

    #[test]
    fn test_second_tokenizer_is_latched() {
        let chain = RegexTokenizer::new().unwrap() | IdTokenizer::new() | LowercaseFilter::new();
        let error = chain.error().unwrap();
        assert!(error.contains("only one tokenizer"));
        assert!(chain.build().unwrap_err().is_composition());
    }

    #[test]
    fn test_filter_only_chain_is_legal_until_built() {
        let chain = LowercaseFilter::new() | StripFilter::new();
        assert!(chain.error().is_none());
        assert_eq!(chain.stages().len(), 2);
        assert!(chain.build().unwrap_err().is_composition());
    }

    #[test]
    fn test_stage_equality_is_structural() {
        let a = Stage::from(StopFilter::new().min_size(3));
        let b = Stage::from(StopFilter::new().min_size(3));
        let c = Stage::from(StopFilter::new().min_size(4));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Stage::from(LowercaseFilter::new()));
        assert_ne!(
            Stage::from(RegexTokenizer::new().unwrap()),
            Stage::from(IdTokenizer::new())
        );
    }

    #[test]
    fn test_stage_downcast() {
        let stage = Stage::from(StopFilter::new().min_size(3));
        let stop = stage.downcast_ref::<StopFilter>().unwrap();
        assert!(stop.is_stopped("ab"));
        assert!(stage.downcast_ref::<LowercaseFilter>().is_none());
    }
}
