//! Exponent rewriting
//!
//! `base^exp` becomes `base^{exp}`. Chains are right associative: the
//! exponent capture swallows everything after a further `^`, so it is
//! rewritten first and `x^2^3` ends up as `x^{2^{3}}`.

use lazy_static::lazy_static;
use regex::Regex;

use super::pipeline::Stage;
use super::utils::{strip_enclosing_parens, try_replace_all};
use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    /// Base and exponent are runs of alphanumerics, dots and parentheses.
    /// The exponent may be followed by another `^` and the rest of the line.
    static ref EXPONENT: Regex = Regex::new(
        r"([a-zA-Z0-9.()]+)\^([a-zA-Z0-9.()]+(\^[^\n\r\x{2028}\x{2029}]*)?)"
    )
    .unwrap();
}

/// Rewrite every `base^exp` in `input`.
///
/// Each chained `^` costs one level of recursion; going past `max_depth`
/// levels is a [`ConversionError::TransformOverflow`].
pub fn rewrite_exponents(input: &str, max_depth: usize) -> ConversionResult<String> {
    rewrite_at_depth(input, 0, max_depth)
}

fn rewrite_at_depth(input: &str, depth: usize, max_depth: usize) -> ConversionResult<String> {
    if depth > max_depth {
        return Err(ConversionError::overflow(Stage::Exponents, max_depth));
    }

    try_replace_all(&EXPONENT, input, |caps| {
        // Innermost exponent first
        let exponent = rewrite_at_depth(&caps[2], depth + 1, max_depth)?;
        let base = strip_enclosing_parens(&caps[1]);
        Ok(format!("{}^{{{}}}", base, exponent))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::{DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};

    fn rewrite(input: &str) -> String {
        rewrite_exponents(input, DEFAULT_MAX_DEPTH).unwrap()
    }

    #[test]
    fn test_simple_power() {
        assert_eq!(rewrite("x^2"), "x^{2}");
        assert_eq!(rewrite("10^-3"), "10^-3");
        assert_eq!(rewrite("2.5^x1"), "2.5^{x1}");
    }

    #[test]
    fn test_right_associative_chain() {
        assert_eq!(rewrite("x^2^3"), "x^{2^{3}}");
        assert_eq!(rewrite("a^b^c^d"), "a^{b^{c^{d}}}");
    }

    #[test]
    fn test_base_parens_are_stripped() {
        assert_eq!(rewrite("(x)^2"), "x^{2}");
        assert_eq!(rewrite("(2x)^(n)"), "2x^{(n)}");
    }

    #[test]
    fn test_base_stops_at_operators() {
        assert_eq!(rewrite("(x+1)^2"), "(x+1)^{2}");
        assert_eq!(rewrite("a^b + c^d"), "a^{b} + c^{d}");
    }

    #[test]
    fn test_chain_swallows_rest_of_line() {
        assert_eq!(rewrite("a^b^c + d"), "a^{b^{c} + d}");
    }

    #[test]
    fn test_dangling_caret() {
        assert_eq!(rewrite("x^"), "x^");
        assert_eq!(rewrite("x^ 2"), "x^ 2");
        assert_eq!(rewrite("^2"), "^2");
    }

    #[test]
    fn test_no_exponent() {
        assert_eq!(rewrite("x + y"), "x + y");
    }

    #[test]
    fn test_depth_guard() {
        assert_eq!(rewrite_exponents("x^2^3", 2).unwrap(), "x^{2^{3}}");
        assert_eq!(
            rewrite_exponents("x^2^3", 1),
            Err(ConversionError::overflow(Stage::Exponents, 1))
        );

        let tower = format!("x{}", "^x".repeat(DEFAULT_MAX_DEPTH + 1));
        assert!(rewrite_exponents(&tower, DEFAULT_MAX_DEPTH).is_err());
    }

    #[test]
    fn test_clamped_depth_stops_long_tower() {
        let tower = format!("x{}", "^x".repeat(20_000));
        assert_eq!(
            rewrite_exponents(&tower, MAX_DEPTH_CEILING),
            Err(ConversionError::overflow(Stage::Exponents, MAX_DEPTH_CEILING))
        );
    }
}
