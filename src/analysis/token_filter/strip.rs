//! Strip filter implementation.

use super::{Filter, MapTokenStream};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::{BoxTokenStream, Token};

/// A filter that removes leading and trailing whitespace from tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StripFilter;

impl StripFilter {
    /// Create a new strip filter.
    pub fn new() -> Self {
        StripFilter
    }
}

fn strip(token: &mut Token) {
    let end = token.text.trim_end().len();
    token.text.truncate(end);
    let start = end - token.text.trim_start().len();
    token.text.drain(..start);
}

impl Filter for StripFilter {
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        _options: &AnalysisOptions,
    ) -> BoxTokenStream<'a> {
        Box::new(MapTokenStream::new(tokens, strip))
    }

    fn name(&self) -> &'static str {
        "strip"
    }
}
