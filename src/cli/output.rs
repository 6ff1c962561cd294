//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{KopisArgs, OutputFormat};
use crate::error::Result;

/// Result of the `analyze` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analyzer: String,
    pub tokens: Vec<Token>,
}

/// Result of the `stages` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StagesResult {
    pub analyzer: String,
    pub stages: Vec<StageInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StageInfo {
    pub name: String,
    pub kind: String,
    pub morphological: bool,
}

/// One row of the `languages` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub stop_words: usize,
    pub stemmer: bool,
}

/// Results that know how to print themselves for people.
pub trait HumanOutput {
    fn write_human<W: Write>(&self, out: &mut W, args: &KopisArgs) -> Result<()>;
}

/// Output a result in the requested format.
pub fn output_result<T, W>(out: &mut W, result: &T, args: &KopisArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
    W: Write,
{
    match args.output_format {
        OutputFormat::Human => result.write_human(out, args),
        OutputFormat::Json => output_json(out, result, args),
    }
}

fn output_json<T: Serialize, W: Write>(out: &mut W, result: &T, args: &KopisArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

impl HumanOutput for AnalysisResult {
    fn write_human<W: Write>(&self, out: &mut W, args: &KopisArgs) -> Result<()> {
        if args.verbosity() > 1 {
            writeln!(out, "Analyzer: {}", self.analyzer)?;
            writeln!(out, "Tokens: {}", self.tokens.len())?;
            writeln!(out)?;
        }

        for token in &self.tokens {
            let mut line = token.text.clone();
            if let Some(position) = token.position {
                line = format!("{position}\t{line}");
            }
            if let (Some(start), Some(end)) = (token.start_char, token.end_char) {
                line.push_str(&format!("\t[{start}..{end}]"));
            }
            if let Some(original) = &token.original_text {
                if original != &token.text {
                    line.push_str(&format!("\t({original})"));
                }
            }
            if token.stopped {
                line.push_str("\t(stopped)");
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

impl HumanOutput for StagesResult {
    fn write_human<W: Write>(&self, out: &mut W, _args: &KopisArgs) -> Result<()> {
        writeln!(out, "Analyzer: {}", self.analyzer)?;
        for (i, stage) in self.stages.iter().enumerate() {
            let morph = if stage.morphological { " (morphological)" } else { "" };
            writeln!(out, "  {i}: {} [{}]{morph}", stage.name, stage.kind)?;
        }
        Ok(())
    }
}

impl HumanOutput for Vec<LanguageInfo> {
    fn write_human<W: Write>(&self, out: &mut W, _args: &KopisArgs) -> Result<()> {
        writeln!(out, "{:<6}{:<12}{:>12}  stemmer", "code", "name", "stop words")?;
        for info in self {
            let stemmer = if info.stemmer { "yes" } else { "no" };
            writeln!(
                out,
                "{:<6}{:<12}{:>12}  {stemmer}",
                info.code, info.name, info.stop_words
            )?;
        }
        Ok(())
    }
}
