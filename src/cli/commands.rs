//! Command implementations for the Kopis CLI.

use std::io::{self, Read, Write};

use anyhow::Context;

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::lang::Language;
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::TokenStream;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{AnalyzerConfig, KopisConfig};
use crate::error::Result;

/// Execute a CLI command, writing to stdout.
pub fn execute_command(args: KopisArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&args, &mut out)
}

/// Execute a CLI command, writing to `out`.
pub fn run_command<W: Write>(args: &KopisArgs, out: &mut W) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze_text(analyze_args, args, out),
        Command::Stages(stages_args) => show_stages(stages_args, args, out),
        Command::Languages => list_languages(args, out),
    }
}

/// Resolve the analyzer and base options from a config file or a preset name.
fn load_analyzer(args: &AnalyzerArgs) -> Result<(PipelineAnalyzer, AnalysisOptions)> {
    let config = match &args.config {
        Some(path) => KopisConfig::from_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => KopisConfig {
            analyzer: AnalyzerConfig::from_name(&args.analyzer, args.lang.as_deref())?,
            options: AnalysisOptions::default(),
        },
    };
    log::info!("using {} analyzer", config.analyzer.name());
    Ok((config.analyzer.build()?, config.options))
}

fn analysis_options(args: &AnalyzeArgs, mut options: AnalysisOptions) -> AnalysisOptions {
    if let Some(mode) = &args.mode {
        options.mode = mode.clone();
    }
    options.positions |= args.positions;
    options.chars |= args.chars;
    options.keep_original |= args.keep_original;
    if args.keep_stopwords {
        options.remove_stopwords = false;
    }
    if args.no_morph {
        options.skip_morphological = true;
    }
    if args.no_tokenize {
        options.tokenize = false;
    }
    options
}

/// Analyze text and print the tokens.
fn analyze_text<W: Write>(args: &AnalyzeArgs, cli_args: &KopisArgs, out: &mut W) -> Result<()> {
    let (analyzer, options) = load_analyzer(&args.analyzer)?;
    let options = analysis_options(args, options);

    let input = match &args.text {
        Some(text) => text.clone().into_bytes(),
        None => {
            log::debug!("reading text from stdin");
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read text from stdin")?;
            buf
        }
    };

    let tokens = analyzer.analyze(&input, &options)?.collect_tokens();
    log::debug!("{} produced {} tokens", analyzer.name(), tokens.len());

    let result = AnalysisResult {
        analyzer: analyzer.name().to_string(),
        tokens,
    };
    output_result(out, &result, cli_args)
}

/// Show the stages of an analyzer.
fn show_stages<W: Write>(args: &StagesArgs, cli_args: &KopisArgs, out: &mut W) -> Result<()> {
    let (analyzer, _) = load_analyzer(&args.analyzer)?;

    let stages = analyzer
        .stages()
        .iter()
        .map(|stage| StageInfo {
            name: stage.name().to_string(),
            kind: (if stage.is_tokenizer() { "tokenizer" } else { "filter" }).to_string(),
            morphological: stage.has_morph(),
        })
        .collect();

    let result = StagesResult {
        analyzer: analyzer.name().to_string(),
        stages,
    };
    output_result(out, &result, cli_args)
}

/// List supported languages.
fn list_languages<W: Write>(cli_args: &KopisArgs, out: &mut W) -> Result<()> {
    let languages: Vec<LanguageInfo> = Language::ALL
        .into_iter()
        .map(|lang| LanguageInfo {
            code: lang.code().to_string(),
            name: lang.name().to_string(),
            stop_words: lang.stop_words().map_or(0, |words| words.len()),
            stemmer: true,
        })
        .collect();

    output_result(out, &languages, cli_args)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn run(argv: &[&str]) -> String {
        let args = KopisArgs::parse_from(argv);
        let mut out = Vec::new();
        run_command(&args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_analyze_human() {
        let output = run(&["kopis", "analyze", "The quick brown foxes"]);
        assert_eq!(output, "quick\nbrown\nfoxes\n");
    }

    #[test]
    fn test_analyze_with_positions_and_stopwords_kept() {
        let output = run(&["kopis", "analyze", "the fox", "--positions", "--keep-stopwords"]);
        assert_eq!(output, "0\tthe\t(stopped)\n1\tfox\n");
    }

    #[test]
    fn test_analyze_json() {
        let output = run(&["kopis", "-f", "json", "analyze", "Running dogs", "-a", "stemming"]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["analyzer"], "stemming");
        let texts: Vec<&str> = value["tokens"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["run", "dog"]);
    }

    #[test]
    fn test_no_morph() {
        let output = run(&["kopis", "analyze", "Running dogs", "-a", "stemming", "--no-morph"]);
        assert_eq!(output, "running\ndogs\n");
    }

    #[test]
    fn test_stages() {
        let output = run(&["kopis", "stages", "-a", "language", "-l", "es"]);
        assert!(output.starts_with("Analyzer: language_es\n"));
        assert!(output.contains("0: regex [tokenizer]"));
        assert!(output.contains("3: stem [filter] (morphological)"));
    }

    #[test]
    fn test_unknown_analyzer() {
        let args = KopisArgs::parse_from(["kopis", "analyze", "text", "-a", "fancy"]);
        let mut out = Vec::new();
        assert!(run_command(&args, &mut out).is_err());
    }

    #[test]
    fn test_config_file_errors_name_the_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        let args = KopisArgs::parse_from([
            "kopis",
            "stages",
            "-c",
            path.to_str().unwrap(),
        ]);

        let err = run_command(&args, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, crate::error::KopisError::Anyhow(_)));
        let message = err.to_string();
        assert!(message.contains("failed to load config file"));
        assert!(message.contains("missing.json"));
        assert!(message.contains("I/O error"));
    }

    #[test]
    fn test_languages() {
        let output = run(&["kopis", "languages"]);
        assert!(output.lines().any(|line| line.starts_with("es")));
        assert_eq!(output.lines().count(), Language::ALL.len() + 1);
    }
}
