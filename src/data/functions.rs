//! Named functions and logarithm bases
//!
//! The function set drives the named-function stage: `sin(x)` becomes
//! `\sin{x}` for every name in the set. The logarithm stage special-cases
//! two literal bases.

use fxhash::FxHashSet;

use crate::utils::error::{ConversionError, ConversionResult};

/// Functions rewritten by default, in regex alternation order
pub static DEFAULT_FUNCTIONS: &[&str] = &["ln", "sin", "cos", "tan"];

/// Base that collapses `log(10, x)` to the plain `\log{x}` form
pub const LOG_BASE_TEN: &str = "10";

/// Base that turns `log(e, x)` into `\ln{x}`
pub const LOG_BASE_E: &str = "e";

/// Ordered, deduplicated set of function names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSet {
    names: Vec<String>,
}

impl FunctionSet {
    /// Build a set from names, rejecting anything that is not a plain
    /// ASCII identifier. Duplicates are dropped, first one wins.
    pub fn new<I, S>(names: I) -> ConversionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = FxHashSet::default();
        let mut ordered = Vec::new();
        for name in names {
            let name = name.into();
            if !is_valid_function_name(&name) {
                return Err(ConversionError::invalid_config(format!(
                    "invalid function name '{}'",
                    name
                )));
            }
            if seen.insert(name.clone()) {
                ordered.push(name);
            }
        }
        Ok(Self { names: ordered })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for FunctionSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_FUNCTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[inline]
fn is_valid_function_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}
