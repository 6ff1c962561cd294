//! Analyzer configuration loaded from JSON.
//!
//! A configuration file names a preset with its settings and, optionally,
//! the options to analyze with:
//!
//! ```json
//! {
//!   "analyzer": { "type": "stemming", "language": "en", "ignore": ["news"] },
//!   "options": { "positions": true, "mode": "index" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{
    KeywordAnalyzer, LanguageAnalyzer, PipelineAnalyzer, SimpleAnalyzer, StandardAnalyzer,
    StemmingAnalyzer,
};
use crate::analysis::options::AnalysisOptions;
use crate::error::{KopisError, Result};

/// One of the analyzer presets with its settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyzerConfig {
    Keyword(KeywordAnalyzer),
    Simple(SimpleAnalyzer),
    Standard(StandardAnalyzer),
    Stemming(StemmingAnalyzer),
    Language(LanguageAnalyzer),
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig::Standard(StandardAnalyzer::default())
    }
}

impl AnalyzerConfig {
    /// Preset names accepted by [`AnalyzerConfig::from_name`].
    pub const NAMES: [&'static str; 5] = ["keyword", "simple", "standard", "stemming", "language"];

    /// A preset with default settings.
    ///
    /// `language` applies to the stemming and language presets, and is
    /// required by the latter.
    pub fn from_name(name: &str, language: Option<&str>) -> Result<Self> {
        let config = match name {
            "keyword" => AnalyzerConfig::Keyword(KeywordAnalyzer::new()),
            "simple" => AnalyzerConfig::Simple(SimpleAnalyzer::new()),
            "standard" => AnalyzerConfig::Standard(StandardAnalyzer::new()),
            "stemming" => {
                let mut analyzer = StemmingAnalyzer::new();
                analyzer.language = language.map(str::to_string);
                AnalyzerConfig::Stemming(analyzer)
            }
            "language" => {
                let code = language.ok_or_else(|| {
                    KopisError::config("the language analyzer needs a language code")
                })?;
                AnalyzerConfig::Language(LanguageAnalyzer::new(code))
            }
            other => {
                return Err(KopisError::config(format!(
                    "unknown analyzer {other:?}, expected one of {}",
                    Self::NAMES.join(", ")
                )));
            }
        };
        Ok(config)
    }

    /// The preset name, as used in the `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyzerConfig::Keyword(_) => "keyword",
            AnalyzerConfig::Simple(_) => "simple",
            AnalyzerConfig::Standard(_) => "standard",
            AnalyzerConfig::Stemming(_) => "stemming",
            AnalyzerConfig::Language(_) => "language",
        }
    }

    /// Compose the configured pipeline.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        match self {
            AnalyzerConfig::Keyword(analyzer) => analyzer.build(),
            AnalyzerConfig::Simple(analyzer) => analyzer.build(),
            AnalyzerConfig::Standard(analyzer) => analyzer.build(),
            AnalyzerConfig::Stemming(analyzer) => analyzer.build(),
            AnalyzerConfig::Language(analyzer) => analyzer.build(),
        }
    }
}

/// Contents of a configuration file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KopisConfig {
    pub analyzer: AnalyzerConfig,
    pub options: AnalysisOptions,
}

impl KopisConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading configuration from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
