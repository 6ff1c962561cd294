//! Language resources: code resolution, stop words and stemmers.
//!
//! Missing resources are reported as `None`, never as errors, so presets can
//! leave out the stages a language does not support.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use ahash::AHashMap;
use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use stop_words::LANGUAGE;

use crate::analysis::token_filter::stem::SnowballStemmer;
use crate::error::KopisError;

/// Languages with Snowball stemmers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    Danish,
    Dutch,
    #[default]
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl Language {
    pub const ALL: [Language; 18] = [
        Language::Arabic,
        Language::Danish,
        Language::Dutch,
        Language::English,
        Language::Finnish,
        Language::French,
        Language::German,
        Language::Greek,
        Language::Hungarian,
        Language::Italian,
        Language::Norwegian,
        Language::Portuguese,
        Language::Romanian,
        Language::Russian,
        Language::Spanish,
        Language::Swedish,
        Language::Tamil,
        Language::Turkish,
    ];

    /// Resolve an ISO 639-1 code or an English language name, ignoring case.
    ///
    /// Region suffixes are ignored, so `"en_US"` and `"pt-BR"` resolve.
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim().to_ascii_lowercase();
        let base = code.split(['-', '_']).next().unwrap_or_default();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == base || lang.name() == code)
    }

    /// The ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::Danish => "da",
            Language::Dutch => "nl",
            Language::English => "en",
            Language::Finnish => "fi",
            Language::French => "fr",
            Language::German => "de",
            Language::Greek => "el",
            Language::Hungarian => "hu",
            Language::Italian => "it",
            Language::Norwegian => "no",
            Language::Portuguese => "pt",
            Language::Romanian => "ro",
            Language::Russian => "ru",
            Language::Spanish => "es",
            Language::Swedish => "sv",
            Language::Tamil => "ta",
            Language::Turkish => "tr",
        }
    }

    /// The lowercase English name.
    pub fn name(self) -> &'static str {
        match self {
            Language::Arabic => "arabic",
            Language::Danish => "danish",
            Language::Dutch => "dutch",
            Language::English => "english",
            Language::Finnish => "finnish",
            Language::French => "french",
            Language::German => "german",
            Language::Greek => "greek",
            Language::Hungarian => "hungarian",
            Language::Italian => "italian",
            Language::Norwegian => "norwegian",
            Language::Portuguese => "portuguese",
            Language::Romanian => "romanian",
            Language::Russian => "russian",
            Language::Spanish => "spanish",
            Language::Swedish => "swedish",
            Language::Tamil => "tamil",
            Language::Turkish => "turkish",
        }
    }

    pub(crate) fn algorithm(self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Greek => Algorithm::Greek,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
        }
    }

    fn stop_words_language(self) -> Option<LANGUAGE> {
        match self {
            Language::Arabic => Some(LANGUAGE::Arabic),
            Language::Danish => Some(LANGUAGE::Danish),
            Language::Dutch => Some(LANGUAGE::Dutch),
            Language::English => Some(LANGUAGE::English),
            Language::Finnish => Some(LANGUAGE::Finnish),
            Language::French => Some(LANGUAGE::French),
            Language::German => Some(LANGUAGE::German),
            Language::Greek => Some(LANGUAGE::Greek),
            Language::Hungarian => Some(LANGUAGE::Hungarian),
            Language::Italian => Some(LANGUAGE::Italian),
            Language::Norwegian => Some(LANGUAGE::Norwegian),
            Language::Portuguese => Some(LANGUAGE::Portuguese),
            Language::Romanian => Some(LANGUAGE::Romanian),
            Language::Russian => Some(LANGUAGE::Russian),
            Language::Spanish => Some(LANGUAGE::Spanish),
            Language::Swedish => Some(LANGUAGE::Swedish),
            Language::Tamil => None,
            Language::Turkish => Some(LANGUAGE::Turkish),
        }
    }

    /// The stop-word list for this language, if one is available.
    pub fn stop_words(self) -> Option<&'static HashSet<String>> {
        STOP_WORDS.get(&self)
    }

    /// A stemmer for this language.
    pub fn stemmer(self) -> SnowballStemmer {
        SnowballStemmer::new(self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = KopisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
            .ok_or_else(|| KopisError::config(format!("unknown language: {s:?}")))
    }
}

static STOP_WORDS: LazyLock<AHashMap<Language, HashSet<String>>> = LazyLock::new(|| {
    Language::ALL
        .into_iter()
        .filter_map(|lang| {
            let words: HashSet<String> = stop_words::get(lang.stop_words_language()?)
                .into_iter()
                .map(|s| s.to_string())
                .collect();
            (!words.is_empty()).then_some((lang, words))
        })
        .collect()
});

/// The stop-word list for a language code, if the language is known and has one.
pub fn stop_words(code: &str) -> Option<&'static HashSet<String>> {
    Language::from_code(code)?.stop_words()
}

/// Whether [`stop_words`] has a list for `code`.
pub fn has_stop_words(code: &str) -> bool {
    stop_words(code).is_some()
}

/// A Snowball stemmer for a language code, if the language has one.
pub fn stemmer(code: &str) -> Option<SnowballStemmer> {
    Language::from_code(code).map(Language::stemmer)
}

/// Whether [`stemmer`] has a stemmer for `code`.
pub fn has_stemmer(code: &str) -> bool {
    Language::from_code(code).is_some()
}
