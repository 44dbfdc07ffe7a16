//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Shorthand diagnostics and error reporting
//! - Error types and result types

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{
    check_shorthand, check_shorthand_with, format_diagnostics, CheckResult, Diagnostic,
    DiagnosticLevel,
};
pub use error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning, WarningKind,
};
