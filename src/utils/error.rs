//! Error handling for Shortex conversions
//!
//! This module provides a unified error type and result type for all
//! conversion operations, plus the warning type used by the non-failing
//! entry points.

use std::fmt;

use crate::core::pipeline::Stage;

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A recursive stage nested deeper than allowed, or the input was
    /// longer than the configured maximum
    TransformOverflow { stage: Option<Stage>, limit: usize },
    /// A shorthand table or function set could not be built
    InvalidConfig { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::TransformOverflow {
                stage: Some(stage),
                limit,
            } => {
                write!(
                    f,
                    "Transform overflow in {} stage: nesting exceeds depth {}",
                    stage, limit
                )
            }
            ConversionError::TransformOverflow { stage: None, limit } => {
                write!(
                    f,
                    "Transform overflow: input exceeds {} characters",
                    limit
                )
            }
            ConversionError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConversionError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Kind of warning generated during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A stage hit the depth guard and its input was passed through
    TransformOverflow,
    /// The whole input was passed through because it was too long
    InputTooLong,
    /// Any other error, reported without stopping the conversion
    Other,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::TransformOverflow => write!(f, "transform overflow"),
            WarningKind::InputTooLong => write!(f, "input too long"),
            WarningKind::Other => write!(f, "error"),
        }
    }
}

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub kind: WarningKind,
    pub message: String,
    /// Stage that produced the warning, if any
    pub stage: Option<Stage>,
}

impl ConversionWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stage: None,
        }
    }

    pub fn in_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }
}

impl From<&ConversionError> for ConversionWarning {
    fn from(err: &ConversionError) -> Self {
        match err {
            ConversionError::TransformOverflow {
                stage: Some(stage), ..
            } => ConversionWarning::new(WarningKind::TransformOverflow, err.to_string())
                .in_stage(*stage),
            ConversionError::TransformOverflow { stage: None, .. } => {
                ConversionWarning::new(WarningKind::InputTooLong, err.to_string())
            }
            _ => ConversionWarning::new(WarningKind::Other, err.to_string()),
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(stage) = self.stage {
            write!(f, "Warning in {} stage: {}", stage, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn overflow(stage: Stage, limit: usize) -> Self {
        ConversionError::TransformOverflow {
            stage: Some(stage),
            limit,
        }
    }

    pub fn input_too_long(limit: usize) -> Self {
        ConversionError::TransformOverflow { stage: None, limit }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        ConversionError::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConversionError::InternalError {
            message: message.into(),
        }
    }

    /// True for both flavors of [`ConversionError::TransformOverflow`]
    pub fn is_overflow(&self) -> bool {
        matches!(self, ConversionError::TransformOverflow { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_display() {
        let err = ConversionError::overflow(Stage::Exponents, 8);
        let msg = err.to_string();
        assert!(msg.contains("exponents"));
        assert!(msg.contains("depth 8"));
        assert!(err.is_overflow());
    }

    #[test]
    fn test_input_too_long_display() {
        let err = ConversionError::input_too_long(100);
        assert!(err.to_string().contains("100 characters"));
        assert!(err.is_overflow());
    }

    #[test]
    fn test_invalid_config() {
        let err = ConversionError::invalid_config("bad name");
        assert!(err.to_string().contains("bad name"));
        assert!(!err.is_overflow());
    }

    #[test]
    fn test_warning_from_error() {
        let warning = ConversionWarning::from(&ConversionError::overflow(Stage::Fractions, 4));
        assert_eq!(warning.kind, WarningKind::TransformOverflow);
        assert_eq!(warning.stage, Some(Stage::Fractions));
        assert!(warning.to_string().starts_with("Warning in fractions stage"));

        let warning = ConversionWarning::from(&ConversionError::input_too_long(4));
        assert_eq!(warning.kind, WarningKind::InputTooLong);
        assert_eq!(warning.stage, None);
    }

    #[test]
    fn test_conversion_output() {
        let output = ConversionOutput::new("x".to_string());
        assert!(!output.has_warnings());

        let output = ConversionOutput::with_warnings(
            "x".to_string(),
            vec![ConversionWarning::new(WarningKind::TransformOverflow, "deep")],
        );
        assert!(output.has_warnings());
    }
}
