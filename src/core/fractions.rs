//! Fraction rewriting
//!
//! `a/b` becomes `\frac{a}{b}`. Each side is either a parenthesized group
//! without inner parentheses or a run of alphanumerics and dots with an
//! optional leading minus. A group that itself contains a fraction is
//! rewritten before its parentheses are dropped.

use lazy_static::lazy_static;
use regex::Regex;

use super::pipeline::Stage;
use super::utils::{strip_enclosing_parens, try_replace_all};
use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    static ref FRACTION: Regex =
        Regex::new(r"(\([^()]+\)|-?[a-zA-Z0-9.]+)/(\([^()]+\)|-?[a-zA-Z0-9.]+)").unwrap();
}

/// Rewrite every `numerator/denominator` in `input`, left to right.
///
/// `a/b/c` only rewrites the leftmost pair: once `a/b` is consumed the
/// trailing `/c` has no numerator.
pub fn rewrite_fractions(input: &str, max_depth: usize) -> ConversionResult<String> {
    rewrite_at_depth(input, 0, max_depth)
}

fn rewrite_at_depth(input: &str, depth: usize, max_depth: usize) -> ConversionResult<String> {
    if depth > max_depth {
        return Err(ConversionError::overflow(Stage::Fractions, max_depth));
    }

    try_replace_all(&FRACTION, input, |caps| {
        let numerator = rewrite_side(&caps[1], depth, max_depth)?;
        let denominator = rewrite_side(&caps[2], depth, max_depth)?;
        Ok(format!(
            r"\frac{{{}}}{{{}}}",
            strip_enclosing_parens(&numerator),
            strip_enclosing_parens(&denominator)
        ))
    })
}

/// Only recurse into a side that still holds a fraction
fn rewrite_side(side: &str, depth: usize, max_depth: usize) -> ConversionResult<String> {
    if FRACTION.is_match(side) {
        rewrite_at_depth(side, depth + 1, max_depth)
    } else {
        Ok(side.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::DEFAULT_MAX_DEPTH;

    fn rewrite(input: &str) -> String {
        rewrite_fractions(input, DEFAULT_MAX_DEPTH).unwrap()
    }

    #[test]
    fn test_simple_fraction() {
        assert_eq!(rewrite("a/b"), r"\frac{a}{b}");
        assert_eq!(rewrite("1.5/2"), r"\frac{1.5}{2}");
        assert_eq!(rewrite("x = 1/2 + 3/4"), r"x = \frac{1}{2} + \frac{3}{4}");
    }

    #[test]
    fn test_groups_lose_parens() {
        assert_eq!(rewrite("(a+b)/(c+d)"), r"\frac{a+b}{c+d}");
        assert_eq!(rewrite("(a+b)/2"), r"\frac{a+b}{2}");
    }

    #[test]
    fn test_negative_operands() {
        assert_eq!(rewrite("-1/2"), r"\frac{-1}{2}");
        assert_eq!(rewrite("1/-2"), r"\frac{1}{-2}");
    }

    #[test]
    fn test_nested_in_group() {
        assert_eq!(rewrite("(a/b)/c"), r"\frac{\frac{a}{b}}{c}");
        assert_eq!(rewrite("(1/2)/(3/4)"), r"\frac{\frac{1}{2}}{\frac{3}{4}}");
    }

    #[test]
    fn test_chain_only_rewrites_leftmost_pair() {
        assert_eq!(rewrite("a/b/c"), r"\frac{a}{b}/c");
        assert_eq!(rewrite("a/b/c/d"), r"\frac{a}{b}/\frac{c}{d}");
    }

    #[test]
    fn test_nested_groups_do_not_match() {
        assert_eq!(rewrite("((a+b))/c"), "((a+b))/c");
    }

    #[test]
    fn test_dangling_slash() {
        assert_eq!(rewrite("a/"), "a/");
        assert_eq!(rewrite("/b"), "/b");
        assert_eq!(rewrite("a / b"), "a / b");
    }

    #[test]
    fn test_depth_guard() {
        assert_eq!(
            rewrite_fractions("(a/b)/c", 0),
            Err(ConversionError::overflow(Stage::Fractions, 0))
        );
        assert!(rewrite_fractions("a/b", 0).is_ok());
    }
}
