//! Command line argument parsing for the Kopis CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Kopis - composable text analysis for full-text search
#[derive(Parser, Debug, Clone)]
#[command(name = "kopis")]
#[command(about = "Run text through tokenizer and filter pipelines")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KopisArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KopisArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze text and print the resulting tokens
    Analyze(AnalyzeArgs),

    /// Show the stages of an analyzer
    Stages(StagesArgs),

    /// List languages with stop words or stemmers
    Languages,
}

/// How the analyzer is chosen. Shared by `analyze` and `stages`.
#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzerArgs {
    /// Analyzer preset (keyword, simple, standard, stemming, language)
    #[arg(short, long, default_value = "standard")]
    pub analyzer: String,

    /// Language code for the stemming and language presets
    #[arg(short, long)]
    pub lang: Option<String>,

    /// JSON configuration file (overrides --analyzer and --lang)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    #[command(flatten)]
    pub analyzer: AnalyzerArgs,

    /// Stream mode passed to filters, e.g. "index" or "query"
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Record token positions
    #[arg(long)]
    pub positions: bool,

    /// Record byte offsets
    #[arg(long)]
    pub chars: bool,

    /// Keep the unfiltered token text
    #[arg(long)]
    pub keep_original: bool,

    /// Mark stop words instead of removing them
    #[arg(long)]
    pub keep_stopwords: bool,

    /// Skip morphological filters such as stemming
    #[arg(long)]
    pub no_morph: bool,

    /// Emit the whole input as a single token
    #[arg(long)]
    pub no_tokenize: bool,
}

/// Arguments for showing analyzer stages
#[derive(Parser, Debug, Clone)]
pub struct StagesArgs {
    #[command(flatten)]
    pub analyzer: AnalyzerArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
