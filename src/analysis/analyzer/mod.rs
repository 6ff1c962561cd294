//! Analyzer implementations that combine tokenizers and filters.
//!
//! [`PipelineAnalyzer`] is the executable pipeline. The other types are
//! preset builders: plain, serde-deserializable settings whose `build()`
//! composes the corresponding pipeline.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::StopFilter;

mod keyword;
mod language;
mod pipeline;
mod simple;
mod standard;
mod stemming;

pub use keyword::KeywordAnalyzer;
pub use language::LanguageAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use simple::SimpleAnalyzer;
pub use standard::StandardAnalyzer;
pub use stemming::StemmingAnalyzer;

/// Stop-word selection for the standard and stemming presets.
///
/// Serialized as `"default"`, `"disabled"`, `{"words": [...]}` or
/// `{"language": "fr"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    /// The built-in English list.
    #[default]
    Default,
    /// No stop filter at all.
    Disabled,
    /// An explicit list.
    Words(BTreeSet<String>),
    /// The list for a language code.
    Language(String),
}

impl StopWords {
    /// The configured stop filter, or `None` when disabled or when the
    /// language has no stop-word list.
    pub(crate) fn stop_filter(
        &self,
        min_size: usize,
        max_size: Option<usize>,
    ) -> Option<StopFilter> {
        let filter = match self {
            StopWords::Disabled => return None,
            StopWords::Default => StopFilter::new(),
            StopWords::Words(words) => StopFilter::from_words(words.iter().cloned()),
            StopWords::Language(code) => match StopFilter::for_language(code) {
                Some(filter) => filter,
                None => {
                    log::debug!("no stop words for language {code:?}, omitting stop filter");
                    return None;
                }
            },
        };
        Some(filter.min_size(min_size).max_size(max_size))
    }
}
