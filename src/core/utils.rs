//! Shared helpers for the rewrite stages

use regex::{Captures, Regex};

use crate::utils::error::ConversionResult;

/// Characters a JavaScript-style `.` refuses to match.
#[inline]
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Strip one pair of enclosing parentheses.
///
/// Only the outermost characters are inspected: `(a)+(b)` becomes
/// `a)+(b`. The inner text must be non-empty and free of line terminators,
/// otherwise the input is returned unchanged.
pub fn strip_enclosing_parens(s: &str) -> &str {
    match s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        Some(inner) if !inner.is_empty() && !inner.chars().any(is_line_terminator) => inner,
        _ => s,
    }
}

/// Like [`Regex::replace_all`], but the replacement may fail.
///
/// Matches are collected left to right without overlap; the first error
/// aborts the whole replacement.
pub fn try_replace_all<F>(re: &Regex, text: &str, mut replace: F) -> ConversionResult<String>
where
    F: FnMut(&Captures<'_>) -> ConversionResult<String>,
{
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        result.push_str(&text[last..whole.start()]);
        result.push_str(&replace(&caps)?);
        last = whole.end();
    }
    result.push_str(&text[last..]);
    Ok(result)
}
