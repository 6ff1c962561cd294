//! Character translation tables.
//!
//! A [`CharMap`] maps single characters to replacement strings. An empty
//! replacement marks a *break* character. Characters missing from the table
//! are kept or treated as breaks depending on [`Unmapped`].
//!
//! Maps are shared by [`CharsetTokenizer`](crate::analysis::tokenizer::CharsetTokenizer),
//! which splits on breaks, and
//! [`CharsetFilter`](crate::analysis::token_filter::CharsetFilter), which
//! drops them.
//!
//! # Charset tables
//!
//! [`CharMap::from_charset_table`] reads the Sphinx `charset_table` syntax:
//! a comma-separated list of entries, each one of
//!
//! ```text
//! a            single character, maps to itself
//! U+00E9       character by code point
//! A->a         single mapping
//! a..z         range mapped to itself
//! A..Z->a..z   range mapped onto a range of equal length
//! U+100..U+12F/2   pairwise folding: even offsets map to the next character
//! ```
//!
//! `#` starts a comment that runs to the end of the line. Characters not
//! listed in a table are breaks.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::{KopisError, Result};

/// How characters missing from a [`CharMap`] are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unmapped {
    /// Pass the character through unchanged.
    #[default]
    Keep,
    /// Treat the character as a break.
    Break,
}

/// A character translation table.
///
/// # Examples
///
/// ```
/// use kopis::analysis::charmap::CharMap;
///
/// let map = CharMap::new().map('é', "e").map('ß', "ss").break_on('-');
/// assert_eq!(map.translate("Straße-café"), "Strassecafe");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharMap {
    table: BTreeMap<char, String>,
    unmapped: Unmapped,
}

static ACCENT_FOLDING: LazyLock<CharMap> = LazyLock::new(|| {
    let mut map = CharMap::new();
    for ch in ('\u{00C0}'..='\u{024F}').chain('\u{1E00}'..='\u{1EFF}') {
        let folded: String = ch.nfkd().filter(|c| !is_combining_mark(*c)).collect();
        if !folded.is_empty() && folded.chars().ne(std::iter::once(ch)) {
            map.table.insert(ch, folded);
        }
    }
    map
});

impl CharMap {
    /// An empty map that keeps every character.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strips diacritics from Latin letters, e.g. `é` becomes `e`.
    pub fn accent_folding() -> Self {
        ACCENT_FOLDING.clone()
    }

    /// Build a map from `(from, to)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .fold(CharMap::new(), |map, (from, to)| map.map(from, to))
    }

    /// Parse a Sphinx-style charset table.
    pub fn from_charset_table(table: &str) -> Result<Self> {
        let mut map = CharMap::new().unmapped(Unmapped::Break);
        let entries = table
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .flat_map(|line| line.split(','))
            .map(str::trim)
            .filter(|entry| !entry.is_empty());

        for entry in entries {
            parse_entry(entry, &mut map.table)?;
        }
        Ok(map)
    }

    /// Map `from` to `to`. An empty `to` makes `from` a break character.
    pub fn map<S: Into<String>>(mut self, from: char, to: S) -> Self {
        self.table.insert(from, to.into());
        self
    }

    /// Make `ch` a break character.
    pub fn break_on(self, ch: char) -> Self {
        self.map(ch, "")
    }

    /// Set how characters missing from the table are treated.
    pub fn unmapped(mut self, unmapped: Unmapped) -> Self {
        self.unmapped = unmapped;
        self
    }

    /// The replacement for `ch`, if the table lists it.
    pub fn get(&self, ch: char) -> Option<&str> {
        self.table.get(&ch).map(String::as_str)
    }

    /// Whether `ch` is a break character.
    pub fn is_break(&self, ch: char) -> bool {
        match self.table.get(&ch) {
            Some(to) => to.is_empty(),
            None => self.unmapped == Unmapped::Break,
        }
    }

    /// Append the translation of `ch` to `out`. Returns `false` for breaks.
    pub fn translate_into(&self, ch: char, out: &mut String) -> bool {
        match self.table.get(&ch) {
            Some(to) if to.is_empty() => false,
            Some(to) => {
                out.push_str(to);
                true
            }
            None => match self.unmapped {
                Unmapped::Keep => {
                    out.push(ch);
                    true
                }
                Unmapped::Break => false,
            },
        }
    }

    /// Translate `text`, dropping break characters.
    pub fn translate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            self.translate_into(ch, &mut out);
        }
        out
    }

    /// Number of table entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn parse_entry(entry: &str, table: &mut BTreeMap<char, String>) -> Result<()> {
    if let Some((source, target)) = entry.split_once("->") {
        let (from_start, from_end) = parse_range(source.trim(), entry)?;
        let (to_start, to_end) = parse_range(target.trim(), entry)?;
        let from_len = from_end - from_start;
        if from_len != to_end - to_start {
            return Err(KopisError::analysis(format!(
                "charset table range lengths differ in {entry:?}"
            )));
        }
        for offset in 0..=from_len {
            let from = code_point(from_start + offset, entry)?;
            let to = code_point(to_start + offset, entry)?;
            table.insert(from, to.to_string());
        }
        return Ok(());
    }

    if let Some(range) = entry.strip_suffix("/2") {
        let (start, end) = parse_range(range.trim(), entry)?;
        let mut cp = start;
        while cp < end {
            let lower = code_point(cp + 1, entry)?;
            table.insert(code_point(cp, entry)?, lower.to_string());
            table.insert(lower, lower.to_string());
            cp += 2;
        }
        return Ok(());
    }

    let (start, end) = parse_range(entry, entry)?;
    for cp in start..=end {
        let ch = code_point(cp, entry)?;
        table.insert(ch, ch.to_string());
    }
    Ok(())
}

/// Parse `X` or `X..Y` into an inclusive code point range.
fn parse_range(item: &str, entry: &str) -> Result<(u32, u32)> {
    let (start, end) = match item.split_once("..") {
        Some((start, end)) => (parse_char(start.trim(), entry)?, parse_char(end.trim(), entry)?),
        None => {
            let ch = parse_char(item, entry)?;
            (ch, ch)
        }
    };
    if end < start {
        return Err(KopisError::analysis(format!(
            "charset table range is reversed in {entry:?}"
        )));
    }
    Ok((start, end))
}

fn parse_char(item: &str, entry: &str) -> Result<u32> {
    if let Some(hex) = item.strip_prefix("U+").or_else(|| item.strip_prefix("u+")) {
        return u32::from_str_radix(hex, 16).map_err(|e| {
            KopisError::analysis(format!("invalid code point {item:?} in {entry:?}: {e}"))
        });
    }

    let mut chars = item.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch as u32),
        _ => Err(KopisError::analysis(format!(
            "expected a single character or U+XXXX, found {item:?} in {entry:?}"
        ))),
    }
}

fn code_point(cp: u32, entry: &str) -> Result<char> {
    char::from_u32(cp).ok_or_else(|| {
        KopisError::analysis(format!("U+{cp:X} is not a valid character in {entry:?}"))
    })
}
