//! Data layer - Static mappings and constants
//!
//! This module contains the configuration data used by the pipeline:
//! - Constant shorthand mappings
//! - Recognized function names and logarithm bases
//! - Loading custom tables from TOML/JSON (`data-loading` feature)

#[cfg(feature = "data-loading")]
pub mod config;
pub mod functions;
pub mod shorthands;

// Re-export commonly used items
#[cfg(feature = "data-loading")]
pub use config::{ConstantEntry, ShorthandConfig};
pub use functions::{FunctionSet, DEFAULT_FUNCTIONS, LOG_BASE_E, LOG_BASE_TEN};
pub use shorthands::{ShorthandTable, DEFAULT_SHORTHANDS};
