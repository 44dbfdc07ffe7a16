//! Function-call shorthands: square roots, named functions and logarithms
//!
//! All three stages capture the argument up to the *first* closing
//! parenthesis. Nested parentheses are not counted, so
//! `sqrt((a+b)*(c+d))` only captures `(a+b`.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::functions::{FunctionSet, LOG_BASE_E, LOG_BASE_TEN};
use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    /// `sqrt(...)` up to the next `)` on the same line
    static ref SQRT: Regex = Regex::new(r"sqrt\(([^\n\r\x{2028}\x{2029}]+?)\)").unwrap();

    /// `log(x)` or `log(base,x)`; arguments are greedy comma-free runs
    static ref LOG: Regex = Regex::new(r"log\(([^,]+)(?:,([^,]+))?\)").unwrap();
}

/// Rewrite `sqrt(x)` as `\sqrt{x}`
pub fn rewrite_roots(input: &str) -> String {
    SQRT.replace_all(input, r"\sqrt{${1}}").into_owned()
}

/// Rewrite `log(...)` calls.
///
/// The base is compared as a string: `log(10,x)` collapses to `\log{x}`,
/// `log(10.0,x)` does not.
pub fn rewrite_logarithms(input: &str) -> String {
    LOG.replace_all(input, |caps: &Captures<'_>| {
        let first = &caps[1];
        match caps.get(2).map(|m| m.as_str()) {
            None => format!(r"\log{{{}}}", first),
            Some(arg) if first == LOG_BASE_TEN => format!(r"\log{{{}}}", arg),
            Some(arg) if first == LOG_BASE_E => format!(r"\ln{{{}}}", arg),
            Some(arg) => format!(r"\log_{}{{{}}}", first, arg),
        }
    })
    .into_owned()
}

/// Rewrites `name(x)` as `\name{x}` for a fixed set of names
#[derive(Debug, Clone)]
pub struct FunctionRewriter {
    pattern: Option<Regex>,
}

impl FunctionRewriter {
    /// Compile the rewriter for a function set. An empty set never matches.
    ///
    /// Names must start at an ASCII word boundary, so a preceding
    /// non-ASCII letter does not block the match.
    pub fn new(functions: &FunctionSet) -> ConversionResult<Self> {
        if functions.is_empty() {
            return Ok(Self { pattern: None });
        }
        let alternation = functions
            .iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"(?-u:\b)({})\(([^\n\r\x{{2028}}\x{{2029}}]+?)\)",
            alternation
        ))
        .map_err(|e| ConversionError::internal(e.to_string()))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn rewrite(&self, input: &str) -> String {
        match &self.pattern {
            Some(re) => re.replace_all(input, r"\${1}{${2}}").into_owned(),
            None => input.to_string(),
        }
    }
}

impl Default for FunctionRewriter {
    fn default() -> Self {
        // The default names are plain identifiers, so compilation cannot fail.
        Self::new(&FunctionSet::default()).unwrap_or(Self { pattern: None })
    }
}

/// Rewrite the default named functions
pub fn rewrite_functions(input: &str) -> String {
    lazy_static! {
        static ref DEFAULT: FunctionRewriter = FunctionRewriter::default();
    }
    DEFAULT.rewrite(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt() {
        assert_eq!(rewrite_roots("sqrt(4)"), r"\sqrt{4}");
        assert_eq!(rewrite_roots("sqrt(x) + sqrt(y)"), r"\sqrt{x} + \sqrt{y}");
    }

    #[test]
    fn test_sqrt_nested_parens_limitation() {
        assert_eq!(rewrite_roots("sqrt((a+b)*(c+d))"), r"\sqrt{(a+b}*(c+d))");
    }

    #[test]
    fn test_sqrt_needs_argument() {
        assert_eq!(rewrite_roots("sqrt()"), "sqrt()");
        assert_eq!(rewrite_roots("sqrt(x"), "sqrt(x");
    }

    #[test]
    fn test_named_functions() {
        assert_eq!(rewrite_functions("sin(x)"), r"\sin{x}");
        assert_eq!(rewrite_functions("ln(x) + cos(2x)"), r"\ln{x} + \cos{2x}");
        assert_eq!(rewrite_functions("tan(a-b)"), r"\tan{a-b}");
    }

    #[test]
    fn test_named_functions_word_boundary() {
        assert_eq!(rewrite_functions("asin(x)"), "asin(x)");
        assert_eq!(rewrite_functions("cosh(x)"), "cosh(x)");
        assert_eq!(rewrite_functions("2sin(x)"), "2sin(x)");
        assert_eq!(rewrite_functions("(sin(x))"), r"(\sin{x})");
    }

    #[test]
    fn test_named_functions_ascii_boundary() {
        assert_eq!(rewrite_functions("ésin(x)"), r"é\sin{x}");
        assert_eq!(rewrite_functions("π·cos(t)"), r"π·\cos{t}");
        assert_eq!(rewrite_functions("_tan(x)"), "_tan(x)");
    }

    #[test]
    fn test_named_functions_nested_parens_limitation() {
        assert_eq!(rewrite_functions("sin((a+b)*c)"), r"\sin{(a+b}*c)");
        assert_eq!(rewrite_functions("cos((x))"), r"\cos{(x})");
    }

    #[test]
    fn test_custom_function_set() {
        let set = FunctionSet::new(["sinh", "sin"]).unwrap();
        let rewriter = FunctionRewriter::new(&set).unwrap();
        assert_eq!(rewriter.rewrite("sinh(x) sin(y) cos(z)"), r"\sinh{x} \sin{y} cos(z)");
    }

    #[test]
    fn test_empty_function_set() {
        let set = FunctionSet::new(Vec::<String>::new()).unwrap();
        let rewriter = FunctionRewriter::new(&set).unwrap();
        assert_eq!(rewriter.rewrite("sin(x)"), "sin(x)");
    }

    #[test]
    fn test_log_single_argument() {
        assert_eq!(rewrite_logarithms("log(x)"), r"\log{x}");
    }

    #[test]
    fn test_log_special_bases() {
        assert_eq!(rewrite_logarithms("log(10,5)"), r"\log{5}");
        assert_eq!(rewrite_logarithms("log(e,5)"), r"\ln{5}");
        assert_eq!(rewrite_logarithms("log(10.0,5)"), r"\log_10.0{5}");
    }

    #[test]
    fn test_log_general_base() {
        assert_eq!(rewrite_logarithms("log(8,2)"), r"\log_8{2}");
        assert_eq!(rewrite_logarithms("log(2,8) + log(3,9)"), r"\log_2{8} + \log_3{9}");
    }

    #[test]
    fn test_log_base_is_not_trimmed() {
        assert_eq!(rewrite_logarithms("log(10, 5)"), r"\log{ 5}");
        assert_eq!(rewrite_logarithms("log( 10,5)"), r"\log_ 10{5}");
    }

    #[test]
    fn test_log_greedy_single_argument() {
        assert_eq!(rewrite_logarithms("log(x) + log(y)"), r"\log{x) + log(y}");
    }

    #[test]
    fn test_log_three_arguments_pass_through() {
        assert_eq!(rewrite_logarithms("log(a,b,c)"), "log(a,b,c)");
    }
}
