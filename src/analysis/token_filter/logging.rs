//! Token logging filter implementation.

use std::fmt;
use std::sync::Arc;

use super::{Filter, MapTokenStream};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, Token};

/// Default log target for [`LoggingFilter`].
pub const DEFAULT_TARGET: &str = "kopis::analysis";

type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// Reports the debug representation of every token and yields it unchanged.
///
/// Tokens go to the `log` facade at debug level under a configurable target,
/// or to a custom sink when one is set.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
/// use kopis::analysis::token_filter::LoggingFilter;
/// use kopis::analysis::tokenizer::RegexTokenizer;
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&lines);
/// let filter = LoggingFilter::with_sink(move |line: &str| sink.lock().unwrap().push(line.to_string()));
///
/// let analyzer = (RegexTokenizer::new().unwrap() | filter).build().unwrap();
/// let texts = analyzer.analyze("alfa bravo", &AnalysisOptions::default()).unwrap().collect_texts();
///
/// assert_eq!(texts, vec!["alfa", "bravo"]);
/// assert_eq!(lines.lock().unwrap().len(), 2);
/// ```
#[derive(Clone)]
pub struct LoggingFilter {
    target: String,
    sink: Option<Sink>,
}

impl LoggingFilter {
    /// Log to the `kopis::analysis` target.
    pub fn new() -> Self {
        Self::with_target(DEFAULT_TARGET)
    }

    /// Log to a custom target.
    pub fn with_target<S: Into<String>>(target: S) -> Self {
        LoggingFilter {
            target: target.into(),
            sink: None,
        }
    }

    /// Send token representations to `sink` instead of the logger.
    pub fn with_sink<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        LoggingFilter {
            target: DEFAULT_TARGET.to_string(),
            sink: Some(Arc::new(sink)),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LoggingFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingFilter")
            .field("target", &self.target)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl PartialEq for LoggingFilter {
    fn eq(&self, other: &Self) -> bool {
        let same_sink = match (&self.sink, &other.sink) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.target == other.target && same_sink
    }
}

impl Filter for LoggingFilter {
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        _options: &AnalysisOptions,
    ) -> BoxTokenStream<'a> {
        let target = self.target.as_str();
        match &self.sink {
            Some(sink) => Box::new(MapTokenStream::new(tokens, move |token: &mut Token| {
                sink(&format!("{token:?}"));
            })),
            None => Box::new(MapTokenStream::new(tokens, move |token: &mut Token| {
                if log::log_enabled!(target: target, log::Level::Debug) {
                    log::debug!(target: target, "{token:?}");
                }
            })),
        }
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}
