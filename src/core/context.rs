//! Conversion options
//!
//! This module holds the knobs that change how the pipeline behaves
//! without touching the shorthand tables themselves.

/// Default recursion limit for the exponent and fraction stages
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Hard ceiling on any configured depth. Both recursive stages run on the
/// native stack, so larger limits are clamped down to this.
pub const MAX_DEPTH_CEILING: usize = 256;

/// How constant shorthands are located in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "data-loading", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "data-loading", serde(rename_all = "kebab-case"))]
pub enum ConstantMatching {
    /// Plain substring search: `pi` also matches inside `pixel`
    #[default]
    Literal,
    /// An alphanumeric end of the key must not touch another ASCII
    /// alphanumeric character
    WordBoundary,
}

/// Options for shorthand to LaTeX conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Constant matching strategy
    pub constant_matching: ConstantMatching,
    /// Maximum nesting depth for exponents and fractions
    pub max_depth: usize,
    /// Inputs longer than this many characters are rejected (or passed
    /// through by the non-failing API)
    pub max_input_len: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            constant_matching: ConstantMatching::Literal,
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
        }
    }
}

impl ConvertOptions {
    /// Constants only match as whole words
    pub fn strict_words() -> Self {
        Self {
            constant_matching: ConstantMatching::WordBoundary,
            ..Default::default()
        }
    }

    /// Explicit depth and input-size limits
    pub fn bounded(max_depth: usize, max_input_len: usize) -> Self {
        Self {
            max_depth: max_depth.clamp(1, MAX_DEPTH_CEILING),
            max_input_len: Some(max_input_len),
            ..Default::default()
        }
    }

    /// Depth limit actually enforced: `max_depth` clamped to
    /// `1..=MAX_DEPTH_CEILING`
    #[inline]
    pub fn depth_limit(&self) -> usize {
        self.max_depth.clamp(1, MAX_DEPTH_CEILING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.constant_matching, ConstantMatching::Literal);
        assert_eq!(opts.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(opts.max_input_len, None);
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            ConvertOptions::strict_words().constant_matching,
            ConstantMatching::WordBoundary
        );
        let opts = ConvertOptions::bounded(0, 10);
        assert_eq!(opts.max_depth, 1);
        assert_eq!(opts.max_input_len, Some(10));
        assert_eq!(ConvertOptions::bounded(100_000, 10).max_depth, MAX_DEPTH_CEILING);
    }

    #[test]
    fn test_depth_limit_floor() {
        let opts = ConvertOptions {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(opts.depth_limit(), 1);
    }

    #[test]
    fn test_depth_limit_ceiling() {
        let opts = ConvertOptions {
            max_depth: usize::MAX,
            ..Default::default()
        };
        assert_eq!(opts.depth_limit(), MAX_DEPTH_CEILING);
        assert_eq!(ConvertOptions::default().depth_limit(), DEFAULT_MAX_DEPTH);
    }
}
