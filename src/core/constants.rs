//! Constant shorthand substitution
//!
//! Each table entry replaces at most one occurrence of its key, in table
//! order. This is plain text replacement, not a token-aware pass.

use super::context::ConstantMatching;
use crate::data::shorthands::ShorthandTable;

/// Replace the first occurrence of every shorthand key by its markup.
pub fn substitute_constants(input: &str, table: &ShorthandTable, matching: ConstantMatching) -> String {
    let mut text = input.to_string();
    for (shorthand, markup) in table.iter() {
        let found = match matching {
            ConstantMatching::Literal => text.find(shorthand),
            ConstantMatching::WordBoundary => find_word(&text, shorthand),
        };
        if let Some(start) = found {
            text.replace_range(start..start + shorthand.len(), markup);
        }
    }
    text
}

/// Find the first occurrence of `key` whose alphanumeric ends do not run
/// into neighbouring ASCII alphanumerics.
pub(crate) fn find_word(haystack: &str, key: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(key) {
        let start = from + pos;
        let end = start + key.len();
        if is_word_edge(haystack, key, start, end) {
            return Some(start);
        }
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        if from > haystack.len() {
            break;
        }
    }
    None
}

pub(crate) fn is_word_edge(haystack: &str, key: &str, start: usize, end: usize) -> bool {
    let starts_word = key.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let ends_word = key.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());

    let before_ok = !starts_word
        || !haystack[..start]
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_alphanumeric());
    let after_ok = !ends_word
        || !haystack[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric());

    before_ok && after_ok
}
