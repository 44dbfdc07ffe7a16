//! Quoted text handling
//!
//! `"..."` spans become `\text{...}` with LaTeX special characters escaped.
//! A span never crosses a line break, and a lone quote is left alone.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::ops::Range;

lazy_static! {
    /// Shortest `"..."` span on a single line
    static ref QUOTED: Regex = Regex::new(r#""([^\n\r\x{2028}\x{2029}]*?)""#).unwrap();

    /// Characters with special meaning in LaTeX
    static ref SPECIAL_CHARS: Regex = Regex::new(r"([#$%&_{}~^\\])").unwrap();
}

/// Escape LaTeX special characters with a backslash
pub fn escape_latex(text: &str) -> String {
    SPECIAL_CHARS.replace_all(text, r"\$1").into_owned()
}

/// Byte ranges of the quoted spans (quotes included)
pub(crate) fn quoted_spans(input: &str) -> Vec<Range<usize>> {
    QUOTED.find_iter(input).map(|m| m.range()).collect()
}

/// Rewrite every quoted span as escaped `\text{...}`
pub fn escape_quoted_text(input: &str) -> String {
    QUOTED
        .replace_all(input, |caps: &Captures<'_>| {
            format!(r"\text{{{}}}", escape_latex(&caps[1]))
        })
        .into_owned()
}
