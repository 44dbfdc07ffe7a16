//! Core conversion modules
//!
//! This module contains the rewrite pipeline and its stages:
//! - `constants`: literal shorthand substitution
//! - `text`: quoted text escaping
//! - `functions`: roots, named functions and logarithms
//! - `exponents`: right-associative powers
//! - `fractions`: nested fractions
//! - `pipeline`: the converter that chains them

pub mod constants;
pub mod context;
pub mod exponents;
pub mod fractions;
pub mod functions;
pub mod pipeline;
pub mod text;
mod utils;

pub use constants::substitute_constants;
pub use context::{ConstantMatching, ConvertOptions, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};
pub use exponents::rewrite_exponents;
pub use fractions::rewrite_fractions;
pub use functions::{rewrite_functions, rewrite_logarithms, rewrite_roots, FunctionRewriter};
pub use pipeline::{ShorthandConverter, Stage, StageTrace};
pub use text::{escape_latex, escape_quoted_text};
