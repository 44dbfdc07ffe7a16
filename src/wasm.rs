//! WASM bindings for shortex
//!
//! This module provides JavaScript-accessible functions for shorthand to
//! LaTeX conversion, for use behind a live-preview editor.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::context::{
    ConstantMatching, ConvertOptions, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING,
};

/// Conversion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct WasmConvertOptions {
    /// Only replace constants that stand as whole words
    #[serde(default)]
    pub word_boundary: bool,
    /// Maximum nesting depth for exponents and fractions
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum input length in characters
    #[serde(default)]
    pub max_input_len: Option<usize>,
    /// Wrap the output in `$$...$$`
    #[serde(default)]
    pub display: bool,
}

#[cfg(feature = "wasm")]
impl Default for WasmConvertOptions {
    fn default() -> Self {
        Self {
            word_boundary: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
            display: false,
        }
    }
}

#[cfg(feature = "wasm")]
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[cfg(feature = "wasm")]
impl From<&WasmConvertOptions> for ConvertOptions {
    fn from(opts: &WasmConvertOptions) -> Self {
        ConvertOptions {
            constant_matching: if opts.word_boundary {
                ConstantMatching::WordBoundary
            } else {
                ConstantMatching::Literal
            },
            max_depth: opts.max_depth.clamp(1, MAX_DEPTH_CEILING),
            max_input_len: opts.max_input_len,
        }
    }
}

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert shorthand math to LaTeX
///
/// # Arguments
/// * `input` - Shorthand math, e.g. `sqrt(x)/2`
///
/// # Returns
/// LaTeX math code (without `$$` delimiters)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "transform")]
pub fn transform_wasm(input: &str) -> String {
    crate::transform(input)
}

/// Convert shorthand math to LaTeX with options
///
/// # Arguments
/// * `input` - Shorthand math
/// * `options` - JavaScript object matching `WasmConvertOptions`
///
/// # Returns
/// A `ConvertResult` object
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "transformWithOptions")]
pub fn transform_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: WasmConvertOptions = if options.is_undefined() || options.is_null() {
        WasmConvertOptions::default()
    } else {
        match serde_wasm_bindgen::from_value(options) {
            Ok(opts) => opts,
            Err(e) => {
                let result = ConvertResult {
                    output: String::new(),
                    success: false,
                    error: Some(format!("Invalid options: {}", e)),
                    warnings: Vec::new(),
                };
                return serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL);
            }
        }
    };

    let converted = crate::transform_with_diagnostics(input, &ConvertOptions::from(&opts));
    let output = if opts.display {
        crate::to_display_block(&converted.content)
    } else {
        converted.content
    };

    let result = ConvertResult {
        output,
        success: true,
        error: None,
        warnings: converted.warnings.iter().map(|w| w.to_string()).collect(),
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Wrap LaTeX markup in `$$...$$`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "toDisplayBlock")]
pub fn to_display_block_wasm(markup: &str) -> String {
    crate::to_display_block(markup)
}

/// Lint shorthand input and return formatted diagnostics
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkShorthand")]
pub fn check_shorthand_wasm(input: &str) -> String {
    let result = crate::diagnostics::check_shorthand(input);
    crate::diagnostics::format_diagnostics(&result, false)
}

#[cfg(all(test, feature = "wasm"))]
mod tests {
    use super::*;

    #[test]
    fn test_options_conversion() {
        let opts = WasmConvertOptions {
            word_boundary: true,
            ..Default::default()
        };
        let converted = ConvertOptions::from(&opts);
        assert_eq!(converted.constant_matching, ConstantMatching::WordBoundary);
        assert_eq!(converted.max_depth, DEFAULT_MAX_DEPTH);

        let deep = WasmConvertOptions {
            max_depth: usize::MAX,
            ..Default::default()
        };
        assert_eq!(ConvertOptions::from(&deep).max_depth, MAX_DEPTH_CEILING);
    }

    #[test]
    fn test_transform_wasm() {
        assert_eq!(transform_wasm("sqrt(2)"), r"\sqrt{2}");
        assert_eq!(to_display_block_wasm("x"), "$$x$$");
    }
}
