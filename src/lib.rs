//! # shortex
//!
//! Fast converter from informal math shorthand to LaTeX, written in Rust.
//!
//! ## Features
//!
//! - **Staged rewriting**: seven ordered text passes, no parse tree
//! - **Nested constructs**: right-associative exponent chains and
//!   fractions of fractions
//! - **Quoted text**: `"..."` becomes `\text{...}` with LaTeX escaping
//! - **Configurable tables**: constant shorthands and function names can be
//!   replaced per converter, or loaded from TOML/JSON
//! - **Bounded**: recursion depth and input size limits
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ```rust
//! use shortex::{to_display_block, transform};
//!
//! assert_eq!(transform("sqrt(x)"), r"\sqrt{x}");
//! assert_eq!(transform("x^2^3"), "x^{2^{3}}");
//! assert_eq!(transform("(a+b)/(c+d)"), r"\frac{a+b}{c+d}");
//! assert_eq!(transform("log(e,5)"), r"\ln{5}");
//! assert_eq!(to_display_block(&transform("a -> b")), r"$$a \to b$$");
//! ```
//!
//! ### Custom configuration
//!
//! ```rust
//! use shortex::{ConvertOptions, FunctionSet, ShorthandConverter, ShorthandTable};
//!
//! let converter = ShorthandConverter::new()
//!     .with_constants(ShorthandTable::default().with("alpha", r"\alpha"))
//!     .with_functions(FunctionSet::new(["sin", "cos", "exp"]).unwrap())
//!     .unwrap()
//!     .with_options(ConvertOptions::strict_words());
//!
//! assert_eq!(converter.convert("exp(alpha)"), r"\exp{\alpha}");
//! assert_eq!(converter.convert("pixel"), "pixel");
//! ```

use lazy_static::lazy_static;

/// Core conversion modules
pub mod core;

/// Data layer - shorthand tables and constants
pub mod data;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core conversion types and stage functions
pub use crate::core::{
    escape_latex, escape_quoted_text, rewrite_exponents, rewrite_fractions, rewrite_functions,
    rewrite_logarithms, rewrite_roots, substitute_constants, ConstantMatching, ConvertOptions,
    ShorthandConverter, Stage, StageTrace, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING,
};

// Re-export data types
#[cfg(feature = "data-loading")]
pub use data::ShorthandConfig;
pub use data::{FunctionSet, ShorthandTable, DEFAULT_FUNCTIONS, DEFAULT_SHORTHANDS};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning, WarningKind,
};

lazy_static! {
    static ref DEFAULT_CONVERTER: ShorthandConverter = ShorthandConverter::new();
}

/// Convert shorthand to LaTeX with the default tables and options
///
/// # Arguments
/// * `input` - Shorthand math, e.g. `sqrt(x)/2`
///
/// # Returns
/// LaTeX math code (without `$$` delimiters)
pub fn transform(input: &str) -> String {
    DEFAULT_CONVERTER.convert(input)
}

/// Convert shorthand to LaTeX with custom options
pub fn transform_with_options(input: &str, options: &ConvertOptions) -> String {
    DEFAULT_CONVERTER
        .convert_with_diagnostics_using(input, options)
        .content
}

/// Convert shorthand to LaTeX, returning warnings for stages that hit a limit
pub fn transform_with_diagnostics(input: &str, options: &ConvertOptions) -> ConversionOutput {
    DEFAULT_CONVERTER.convert_with_diagnostics_using(input, options)
}

/// Convert shorthand to LaTeX, failing with
/// [`ConversionError::TransformOverflow`] instead of passing through
pub fn try_transform(input: &str, options: &ConvertOptions) -> ConversionResult<String> {
    DEFAULT_CONVERTER.convert_until_using(input, Stage::Fractions, options)
}

/// Wrap converted markup as a display-math block for the renderer
pub fn to_display_block(markup: &str) -> String {
    format!("$${}$$", markup)
}
