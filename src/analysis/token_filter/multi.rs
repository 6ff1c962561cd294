//! Mode-dispatching filter implementation.

use std::sync::Arc;

use ahash::AHashMap;

use super::{Filter, PassFilter};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, EmptyTokenStream, Token, TokenStream};

/// Chooses a sub-filter based on the `mode` of the token stream.
///
/// The mode is read from the first token, so it must be consistent across a
/// stream, which it is for streams started by a tokenizer. Modes without a
/// registered filter use the default, a [`PassFilter`] unless replaced.
///
/// The multi filter is never skipped as a whole. With `skip_morphological`
/// set, a selected sub-filter that is morphological is bypassed instead.
///
/// # Examples
///
/// ```
/// use kopis::analysis::options::AnalysisOptions;
/// use kopis::analysis::token::TokenStream;
/// use kopis::analysis::token_filter::{LowercaseFilter, MultiFilter};
/// use kopis::analysis::tokenizer::RegexTokenizer;
///
/// let analyzer = (RegexTokenizer::new().unwrap()
///     | MultiFilter::new().with_mode("query", LowercaseFilter::new()))
///     .build()
///     .unwrap();
///
/// let query = analyzer.analyze("Hello", &AnalysisOptions::query()).unwrap();
/// assert_eq!(query.collect_texts(), vec!["hello"]);
///
/// let index = analyzer.analyze("Hello", &AnalysisOptions::index()).unwrap();
/// assert_eq!(index.collect_texts(), vec!["Hello"]);
/// ```
#[derive(Clone, Debug)]
pub struct MultiFilter {
    filters: AHashMap<String, Arc<dyn Filter>>,
    default: Arc<dyn Filter>,
}

impl MultiFilter {
    /// A multi filter with no modes, passing every stream through.
    pub fn new() -> Self {
        MultiFilter {
            filters: AHashMap::new(),
            default: Arc::new(PassFilter::new()),
        }
    }

    /// Use `filter` for streams whose mode is `mode`.
    pub fn with_mode<S: Into<String>, F: Filter>(mut self, mode: S, filter: F) -> Self {
        self.filters.insert(mode.into(), Arc::new(filter));
        self
    }

    /// Use a shared filter for streams whose mode is `mode`.
    pub fn with_shared_mode<S: Into<String>>(mut self, mode: S, filter: Arc<dyn Filter>) -> Self {
        self.filters.insert(mode.into(), filter);
        self
    }

    /// Use `filter` for modes without a registered filter.
    pub fn with_default<F: Filter>(mut self, filter: F) -> Self {
        self.default = Arc::new(filter);
        self
    }

    /// The filter used for `mode`.
    pub fn select(&self, mode: &str) -> &dyn Filter {
        self.filters
            .get(mode)
            .unwrap_or(&self.default)
            .as_ref()
    }

    /// The registered modes.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }
}

impl PartialEq for MultiFilter {
    fn eq(&self, other: &Self) -> bool {
        *self.default == *other.default
            && self.filters.len() == other.filters.len()
            && self.filters.iter().all(|(mode, filter)| {
                other
                    .filters
                    .get(mode)
                    .is_some_and(|theirs| **filter == **theirs)
            })
    }
}

impl Default for MultiFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for MultiFilter {
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        options: &AnalysisOptions,
    ) -> BoxTokenStream<'a> {
        Box::new(MultiTokenStream {
            multi: self,
            options: options.clone(),
            state: MultiState::Pending(tokens),
        })
    }

    fn name(&self) -> &'static str {
        "multi"
    }

    fn has_morph(&self) -> bool {
        self.default.has_morph() || self.filters.values().any(|filter| filter.has_morph())
    }

    fn clean(&self) {
        self.default.clean();
        for filter in self.filters.values() {
            filter.clean();
        }
    }
}

enum MultiState<'a> {
    /// No token pulled yet; the sub-filter is chosen on the first pull.
    Pending(BoxTokenStream<'a>),
    Active(BoxTokenStream<'a>),
}

struct MultiTokenStream<'a> {
    multi: &'a MultiFilter,
    options: AnalysisOptions,
    state: MultiState<'a>,
}

impl<'a> MultiTokenStream<'a> {
    fn start(&mut self, mut tail: BoxTokenStream<'a>) -> bool {
        if !tail.advance() {
            self.state = MultiState::Active(tail);
            return false;
        }

        let filter = self.multi.select(tail.token().mode());
        let replay: BoxTokenStream<'a> = Box::new(ReplayTokenStream { tail, replay: true });
        let mut stream = if self.options.skip_morphological && filter.is_morph() {
            replay
        } else {
            filter.filter(replay, &self.options)
        };
        let found = stream.advance();
        self.state = MultiState::Active(stream);
        found
    }
}

impl TokenStream for MultiTokenStream<'_> {
    fn advance(&mut self) -> bool {
        if let MultiState::Active(stream) = &mut self.state {
            return stream.advance();
        }
        let placeholder = MultiState::Active(Box::new(EmptyTokenStream::new()));
        match std::mem::replace(&mut self.state, placeholder) {
            MultiState::Pending(tail) => self.start(tail),
            MultiState::Active(_) => false,
        }
    }

    fn token(&self) -> &Token {
        match &self.state {
            MultiState::Pending(stream) | MultiState::Active(stream) => stream.token(),
        }
    }

    fn token_mut(&mut self) -> &mut Token {
        match &mut self.state {
            MultiState::Pending(stream) | MultiState::Active(stream) => stream.token_mut(),
        }
    }
}

/// Re-yields the token the upstream is currently on, then continues pulling.
struct ReplayTokenStream<'a> {
    tail: BoxTokenStream<'a>,
    replay: bool,
}

impl TokenStream for ReplayTokenStream<'_> {
    fn advance(&mut self) -> bool {
        if self.replay {
            self.replay = false;
            return true;
        }
        self.tail.advance()
    }

    fn token(&self) -> &Token {
        self.tail.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.tail.token_mut()
    }
}
