//! Identity filter.

use super::Filter;
use crate::analysis::options::AnalysisOptions;
use crate::analysis::token::BoxTokenStream;

/// Yields the upstream tokens unchanged.
///
/// The default branch of a [`MultiFilter`](super::MultiFilter).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassFilter;

impl PassFilter {
    pub fn new() -> Self {
        PassFilter
    }
}

impl Filter for PassFilter {
    fn filter<'a>(
        &'a self,
        tokens: BoxTokenStream<'a>,
        _options: &AnalysisOptions,
    ) -> BoxTokenStream<'a> {
        tokens
    }

    fn name(&self) -> &'static str {
        "pass"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{IntoTokenStream, Token, TokenStream};

    #[test]
    fn test_pass_filter() {
        let tokens = vec![Token::new("Alfa").with_position(3), Token::new("bravo").stop()];
        let result = PassFilter::new()
            .filter(tokens.clone().into_token_stream(), &AnalysisOptions::default())
            .collect_tokens();
        assert_eq!(result, tokens);
    }
}
