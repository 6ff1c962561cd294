//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::{Matches, Regex};

use super::{Emitter, SingleTokenStream, Tokenizer};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::stage::Chain;
use crate::analysis::token::{BoxTokenStream, EmptyTokenStream, Token, TokenStream};
use crate::analysis::token_filter::StripFilter;
use crate::error::{KopisError, Result};

/// Pattern for words, allowing single interior dots (`"v1.2"`, `"e.g"`).
pub const DEFAULT_PATTERN: &str = r"\w+(\.?\w+)*";

/// A regex-based tokenizer that extracts tokens using regular expressions.
///
/// With `gaps` the pattern matches separators instead, and the non-empty text
/// between separators becomes the tokens.
///
/// # Examples
///
/// ```
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
/// use kopis::analysis::tokenizer::{RegexTokenizer, Tokenizer};
///
/// let tokenizer = RegexTokenizer::new().unwrap();
/// let texts = tokenizer
///     .tokenize("hi there 3.141 big-time under_score", &AnalysisOptions::default())
///     .collect_texts();
/// assert_eq!(texts, vec!["hi", "there", "3.141", "big", "time", "under_score"]);
/// ```
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Whether to extract gaps (text between matches) instead of matches
    gaps: bool,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default word pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| KopisError::analysis(format!("Invalid regex pattern: {e}")))?;
        Ok(Self::from_regex(regex))
    }

    /// Create a tokenizer that extracts gaps (text between matches) instead of matches.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Ok(Self::with_pattern(pattern)?.gaps(true))
    }

    /// Wrap an already compiled regex.
    pub fn from_regex(regex: Regex) -> Self {
        RegexTokenizer {
            pattern: Arc::new(regex),
            gaps: false,
        }
    }

    /// Split on runs of spaces, tabs and newlines.
    ///
    /// Punctuation stays attached: `"big-time,"` is one token.
    pub fn space_separated() -> Result<Self> {
        Self::with_pattern(r"[^ \t\r\n]+")
    }

    /// Split on commas and strip surrounding whitespace from each piece.
    pub fn comma_separated() -> Result<Chain> {
        Ok(Self::with_pattern(r"[^,]+")? | StripFilter::new())
    }

    /// Set whether the pattern matches separators instead of tokens.
    pub fn gaps(mut self, gaps: bool) -> Self {
        self.gaps = gaps;
        self
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check if this tokenizer extracts gaps.
    pub fn is_gaps(&self) -> bool {
        self.gaps
    }
}

impl PartialEq for RegexTokenizer {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str() && self.gaps == other.gaps
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str, options: &AnalysisOptions) -> BoxTokenStream<'a> {
        if !options.tokenize {
            return Box::new(SingleTokenStream::new(text, options));
        }
        if text.is_empty() {
            return Box::new(EmptyTokenStream::new());
        }
        Box::new(RegexTokenStream {
            text,
            matches: self.pattern.find_iter(text),
            gaps: self.gaps,
            last_end: 0,
            done: false,
            emitter: Emitter::new(options),
        })
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

/// Lazy stream over the matches (or gaps) of a pattern.
pub struct RegexTokenStream<'a> {
    text: &'a str,
    matches: Matches<'a, 'a>,
    gaps: bool,
    last_end: usize,
    done: bool,
    emitter: Emitter,
}

impl RegexTokenStream<'_> {
    fn advance_gap(&mut self) -> bool {
        for found in self.matches.by_ref() {
            let (start, end) = (self.last_end, found.start());
            self.last_end = found.end();
            if end > start {
                self.emitter.emit(&self.text[start..end], start, end);
                return true;
            }
        }

        self.done = true;
        let start = self.last_end;
        if start < self.text.len() {
            self.emitter
                .emit(&self.text[start..], start, self.text.len());
            return true;
        }
        false
    }
}

impl TokenStream for RegexTokenStream<'_> {
    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        if self.gaps {
            return self.advance_gap();
        }
        match self.matches.next() {
            Some(found) => {
                self.emitter.emit(found.as_str(), found.start(), found.end());
                true
            }
            None => {
                self.done = true;
                false
            }
        }
    }

    fn token(&self) -> &Token {
        self.emitter.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.emitter.token_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokenizer: &RegexTokenizer, text: &str) -> Vec<String> {
        tokenizer
            .tokenize(text, &AnalysisOptions::default())
            .collect_texts()
    }

    #[test]
    fn test_regex_tokenizer() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let options = AnalysisOptions::default()
            .with_positions(true)
            .with_chars(true);
        let tokens = tokenizer.tokenize("hello world", &options).collect_tokens();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[0].position, Some(0));
        assert_eq!(tokens[0].start_char, Some(0));
        assert_eq!(tokens[0].end_char, Some(5));

        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[1].position, Some(1));
        assert_eq!(tokens[1].start_char, Some(6));
        assert_eq!(tokens[1].end_char, Some(11));
    }

    #[test]
    fn test_start_pos_and_start_char() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let options = AnalysisOptions::default()
            .with_positions(true)
            .with_chars(true)
            .with_start_pos(2)
            .with_start_char(2);
        let tokens = tokenizer.tokenize("aaa bbb", &options).collect_tokens();

        assert_eq!(tokens[0].position, Some(2));
        assert_eq!(tokens[1].position, Some(3));
        assert_eq!((tokens[0].start_char, tokens[0].end_char), (Some(2), Some(5)));
        assert_eq!((tokens[1].start_char, tokens[1].end_char), (Some(6), Some(9)));
    }

    #[test]
    fn test_regex_tokenizer_with_gaps() {
        let tokenizer = RegexTokenizer::with_gaps(r"\s*,\s*").unwrap();
        let options = AnalysisOptions::default()
            .with_chars(true)
            .with_start_char(100);
        let tokens = tokenizer.tokenize("a, bb ,, ccc", &options).collect_tokens();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "bb", "ccc"]);
        assert_eq!((tokens[2].start_char, tokens[2].end_char), (Some(109), Some(112)));
    }

    #[test]
    fn test_gaps_tokens_reconstruct_input() {
        let tokenizer = RegexTokenizer::with_gaps(r"-").unwrap();
        let text = "alfa-bravo-charlie";
        let options = AnalysisOptions::default().with_chars(true);
        let tokens = tokenizer.tokenize(text, &options).collect_tokens();

        let mut rebuilt = String::new();
        let mut last = 0;
        for token in &tokens {
            let (start, end) = (token.start_char.unwrap(), token.end_char.unwrap());
            rebuilt.push_str(&text[last..start]);
            rebuilt.push_str(&token.text);
            last = end;
        }
        rebuilt.push_str(&text[last..]);
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_gaps_trailing_separator() {
        let tokenizer = RegexTokenizer::with_gaps(" ").unwrap();
        assert_eq!(texts(&tokenizer, " a b "), vec!["a", "b"]);
    }

    #[test]
    fn test_space_separated() {
        let tokenizer = RegexTokenizer::space_separated().unwrap();
        assert_eq!(
            texts(&tokenizer, "hi there big-time, what's up"),
            vec!["hi", "there", "big-time,", "what's", "up"]
        );
    }

    #[test]
    fn test_comma_separated() {
        let analyzer = RegexTokenizer::comma_separated().unwrap().build().unwrap();
        let texts = analyzer
            .analyze("hi there, what's , up", &AnalysisOptions::default())
            .unwrap()
            .collect_texts();
        assert_eq!(texts, vec!["hi there", "what's", "up"]);
    }

    #[test]
    fn test_no_tokenize_emits_whole_input() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let options = AnalysisOptions::default().with_tokenize(false);
        let texts = tokenizer.tokenize("Hello there", &options).collect_texts();
        assert_eq!(texts, vec!["Hello there"]);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = RegexTokenizer::new().unwrap();
        assert!(texts(&tokenizer, "").is_empty());
        let gaps = RegexTokenizer::with_gaps(",").unwrap();
        assert!(texts(&gaps, "").is_empty());
    }

    #[test]
    fn test_stream_is_fused() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let mut stream = tokenizer.tokenize("one", &AnalysisOptions::default());
        assert!(stream.advance());
        assert!(!stream.advance());
        assert!(!stream.advance());
    }

    #[test]
    fn test_invalid_pattern() {
        let result = RegexTokenizer::with_pattern(r"(unclosed");
        assert!(matches!(result, Err(KopisError::Analysis(_))));
    }

    #[test]
    fn test_equality() {
        let a = RegexTokenizer::with_pattern(r"\w+").unwrap();
        let b = RegexTokenizer::with_pattern(r"\w+").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, b.clone().gaps(true));
    }
}
