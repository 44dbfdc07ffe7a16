//! Loading shorthand tables from TOML or JSON
//!
//! Constants are stored as an array of entries so that file order is the
//! application order:
//!
//! ```toml
//! functions = ["ln", "sin", "cos", "tan", "sinh"]
//!
//! [[constants]]
//! shorthand = "pi"
//! markup = '\pi'
//! ```

use serde::{Deserialize, Serialize};

use super::functions::FunctionSet;
use super::shorthands::ShorthandTable;
use crate::utils::error::{ConversionError, ConversionResult};

/// A single `shorthand -> markup` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantEntry {
    pub shorthand: String,
    pub markup: String,
}

/// On-disk shorthand configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorthandConfig {
    /// Constants in application order
    #[serde(default)]
    pub constants: Vec<ConstantEntry>,
    /// Function names; `None` keeps the default set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<String>>,
}

impl ShorthandConfig {
    pub fn from_toml_str(source: &str) -> ConversionResult<Self> {
        toml::from_str(source).map_err(|e| ConversionError::invalid_config(e.to_string()))
    }

    pub fn from_json_str(source: &str) -> ConversionResult<Self> {
        serde_json::from_str(source).map_err(|e| ConversionError::invalid_config(e.to_string()))
    }

    /// Load from a file, picking the format from the extension
    /// (`.json` is JSON, anything else is TOML)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> ConversionResult<Self> {
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }

    /// Build the constant table. Later duplicates replace earlier markup.
    pub fn table(&self) -> ShorthandTable {
        self.constants
            .iter()
            .map(|e| (e.shorthand.clone(), e.markup.clone()))
            .collect()
    }

    /// Build the function set, falling back to the defaults
    pub fn function_set(&self) -> ConversionResult<FunctionSet> {
        match &self.functions {
            Some(names) => FunctionSet::new(names.iter().cloned()),
            None => Ok(FunctionSet::default()),
        }
    }
}

impl From<&ShorthandTable> for ShorthandConfig {
    fn from(table: &ShorthandTable) -> Self {
        Self {
            constants: table
                .iter()
                .map(|(k, v)| ConstantEntry {
                    shorthand: k.to_string(),
                    markup: v.to_string(),
                })
                .collect(),
            functions: None,
        }
    }
}
