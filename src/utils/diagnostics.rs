//! Shorthand diagnostics
//!
//! This module lints shorthand input without converting it. It points out
//! fragments the pipeline will silently leave alone or cut short:
//!
//! - Unterminated quoted text
//! - `^` or `/` without an operand
//! - Unbalanced parentheses
//! - Nested parentheses inside `sqrt(`, `log(` and named function calls
//! - Constants that will be replaced inside a longer word
//!
//! ## Example
//!
//! ```rust
//! use shortex::diagnostics::check_shorthand;
//!
//! let result = check_shorthand(r#""unclosed"#);
//! assert!(result.has_errors());
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::ops::Range;

use crate::core::constants::is_word_edge;
use crate::core::context::ConstantMatching;
use crate::core::pipeline::ShorthandConverter;
use crate::core::text::quoted_spans;

lazy_static! {
    /// Call-like constructs with fixed names
    static ref FIXED_CALL: Regex = Regex::new(r"(sqrt|log)\(").unwrap();
    /// Any identifier directly followed by `(`
    static ref IDENT_CALL: Regex = Regex::new(r"\b([a-zA-Z0-9]+)\(").unwrap();
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - part of the input will pass through unconverted
    Warning,
    /// Error - the output will likely fail to render
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed, in characters)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "{}:{}: {}: {}", line, col, self.level, self.message)?
            }
            _ => write!(f, "{}: {}", self.level, self.message)?,
        }

        // The offending line, with a caret under the column
        if let Some(ref source) = self.source_text {
            write!(f, "\n    {}", source)?;
            if let Some(col) = self.column {
                write!(f, "\n    {:>width$}", "^", width = col)?;
            }
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n    help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check shorthand input against the default tables
pub fn check_shorthand(input: &str) -> CheckResult {
    check_shorthand_with(input, &ShorthandConverter::new())
}

/// Check shorthand input against a converter's tables and options
pub fn check_shorthand_with(input: &str, converter: &ShorthandConverter) -> CheckResult {
    let mut result = CheckResult::new();
    let source = Source::new(input);

    check_quotes(&source, &mut result);
    check_operators(&source, &mut result);
    check_paren_balance(&source, &mut result);
    check_nested_calls(&source, converter, &mut result);
    if converter.options().constant_matching == ConstantMatching::Literal {
        check_constants_in_words(&source, converter, &mut result);
    }

    result
}

/// Input plus the position data every check needs
struct Source<'a> {
    text: &'a str,
    line_offsets: Vec<usize>,
    quoted: Vec<Range<usize>>,
}

impl<'a> Source<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            line_offsets: compute_line_offsets(text),
            quoted: quoted_spans(text),
        }
    }

    fn in_quotes(&self, offset: usize) -> bool {
        self.quoted.iter().any(|r| r.contains(&offset))
    }

    /// Convert byte offset to 1-indexed line and character column
    fn location(&self, offset: usize) -> (usize, usize) {
        let line = self
            .line_offsets
            .iter()
            .position(|&o| o > offset)
            .unwrap_or(self.line_offsets.len())
            - 1;
        let start = self.line_offsets.get(line).copied().unwrap_or(0);
        let column = self.text[start..offset].chars().count() + 1;
        (line + 1, column)
    }

    fn line_text(&self, line: usize) -> &'a str {
        self.text.lines().nth(line - 1).unwrap_or("")
    }
}

/// Compute byte offsets for each line start
fn compute_line_offsets(input: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in input.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// A quote that is not part of a closed span
fn check_quotes(source: &Source<'_>, result: &mut CheckResult) {
    for (offset, c) in source.text.char_indices() {
        if c == '"' && !source.in_quotes(offset) {
            let (line, col) = source.location(offset);
            result.add(
                Diagnostic::new(DiagnosticLevel::Error, "unterminated quoted text")
                    .with_location(line, col)
                    .with_source(source.line_text(line))
                    .with_suggestion("Close the text with '\"' on the same line"),
            );
        }
    }
}

#[inline]
fn is_operand_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.'
}

/// `^` and `/` must touch an operand on both sides
fn check_operators(source: &Source<'_>, result: &mut CheckResult) {
    let text = source.text;
    for (offset, c) in text.char_indices() {
        if (c != '^' && c != '/') || source.in_quotes(offset) {
            continue;
        }
        let before = text[..offset].chars().last();
        let after = text[offset + 1..].chars().next();

        let (has_left, has_right) = if c == '^' {
            (
                before.is_some_and(|b| is_operand_char(b) || b == '(' || b == ')'),
                after.is_some_and(|a| is_operand_char(a) || a == '(' || a == ')'),
            )
        } else {
            (
                before.is_some_and(|b| is_operand_char(b) || b == ')'),
                after.is_some_and(|a| is_operand_char(a) || a == '(' || a == '-'),
            )
        };

        if has_left && has_right {
            continue;
        }

        let (line, col) = source.location(offset);
        let (message, suggestion) = if c == '^' {
            (
                "'^' is missing an operand and will be left as is",
                "Write powers without spaces, e.g. x^2 or (x+1)^(n)",
            )
        } else {
            (
                "'/' is missing an operand and will be left as is",
                "Write fractions without spaces, e.g. a/b or (a+b)/(c+d)",
            )
        };
        result.add(
            Diagnostic::new(DiagnosticLevel::Warning, message)
                .with_location(line, col)
                .with_source(source.line_text(line))
                .with_suggestion(suggestion),
        );
    }
}

/// Check for unbalanced parentheses outside quoted text
fn check_paren_balance(source: &Source<'_>, result: &mut CheckResult) {
    let mut open: Vec<usize> = Vec::new();

    for (offset, c) in source.text.char_indices() {
        if source.in_quotes(offset) {
            continue;
        }
        match c {
            '(' => open.push(offset),
            ')' => {
                if open.pop().is_none() {
                    let (line, col) = source.location(offset);
                    result.add(
                        Diagnostic::new(DiagnosticLevel::Warning, "unmatched closing parenthesis ')'")
                            .with_location(line, col)
                            .with_suggestion("Check for a missing '('"),
                    );
                }
            }
            _ => {}
        }
    }

    if let Some(&first) = open.first() {
        let (line, col) = source.location(first);
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                format!(
                    "{} unclosed parenthes{}",
                    open.len(),
                    if open.len() == 1 { "is" } else { "es" }
                ),
            )
            .with_location(line, col)
            .with_suggestion("Check for a missing ')'"),
        );
    }
}

/// Calls whose argument holds a `(` before the first `)` get cut short
fn check_nested_calls(source: &Source<'_>, converter: &ShorthandConverter, result: &mut CheckResult) {
    let text = source.text;
    let fixed = FIXED_CALL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).zip(caps.get(0)));
    let named = IDENT_CALL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).zip(caps.get(0)))
        .filter(|(name, _)| converter.functions().contains(name.as_str()));

    for (name, whole) in fixed.chain(named) {
        if source.in_quotes(whole.start()) {
            continue;
        }
        let rest = &text[whole.end()..];
        let first_close = rest.find(')');
        let first_open = rest.find('(');
        let nested = match (first_open, first_close) {
            (Some(open), Some(close)) => open < close,
            _ => false,
        };
        if nested {
            let (line, col) = source.location(whole.start());
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!(
                        "nested parentheses inside '{}(' are cut at the first ')'",
                        name.as_str()
                    ),
                )
                .with_location(line, col)
                .with_source(source.line_text(line))
                .with_suggestion("Avoid parentheses inside the call argument"),
            );
        }
    }
}

/// Literal matching replaces the first occurrence even inside a word
fn check_constants_in_words(
    source: &Source<'_>,
    converter: &ShorthandConverter,
    result: &mut CheckResult,
) {
    let text = source.text;
    for (shorthand, markup) in converter.constants().iter() {
        let Some(start) = text.find(shorthand) else {
            continue;
        };
        if shorthand.is_empty() || is_word_edge(text, shorthand, start, start + shorthand.len()) {
            continue;
        }
        let (line, col) = source.location(start);
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                format!(
                    "'{}' will be replaced by '{}' inside a longer word",
                    shorthand, markup
                ),
            )
            .with_location(line, col)
            .with_source(source.line_text(line))
            .with_suggestion("Enable word-boundary matching to keep the word intact"),
        );
    }
}

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Format check results for terminal output, one block per diagnostic
/// followed by a summary line
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let paint = |text: String, color: &str| {
        if use_color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text
        }
    };

    let mut blocks: Vec<String> = result
        .diagnostics
        .iter()
        .map(|diag| {
            let color = match diag.level {
                DiagnosticLevel::Error => RED,
                DiagnosticLevel::Warning => YELLOW,
                DiagnosticLevel::Info => BLUE,
            };
            paint(diag.to_string(), color)
        })
        .collect();

    let summary_color = if result.has_errors() {
        RED
    } else if result.warnings > 0 {
        YELLOW
    } else {
        GREEN
    };
    blocks.push(paint(format!("Summary: {}", result.summary()), summary_color));

    blocks.join("\n\n")
}
