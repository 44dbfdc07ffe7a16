//! The staged rewrite pipeline
//!
//! A [`ShorthandConverter`] owns its configuration (constant table,
//! function set, options) and runs the seven stages in a fixed order, each
//! one consuming the previous stage's output.

use std::fmt;

use super::constants::substitute_constants;
use super::context::ConvertOptions;
use super::exponents::rewrite_exponents;
use super::fractions::rewrite_fractions;
use super::functions::{rewrite_logarithms, rewrite_roots, FunctionRewriter};
use super::text::escape_quoted_text;
use crate::data::functions::FunctionSet;
use crate::data::shorthands::ShorthandTable;
use crate::utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};

/// One rewrite stage, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// `pi` -> `\pi`, `->` -> `\to`, ...
    Constants,
    /// `"a&b"` -> `\text{a\&b}`
    QuotedText,
    /// `sqrt(x)` -> `\sqrt{x}`
    Roots,
    /// `sin(x)` -> `\sin{x}`
    Functions,
    /// `log(b,x)` -> `\log_b{x}`
    Logarithms,
    /// `x^2^3` -> `x^{2^{3}}`
    Exponents,
    /// `a/b` -> `\frac{a}{b}`
    Fractions,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 7] = [
        Stage::Constants,
        Stage::QuotedText,
        Stage::Roots,
        Stage::Functions,
        Stage::Logarithms,
        Stage::Exponents,
        Stage::Fractions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Constants => "constants",
            Stage::QuotedText => "quoted-text",
            Stage::Roots => "roots",
            Stage::Functions => "functions",
            Stage::Logarithms => "logarithms",
            Stage::Exponents => "exponents",
            Stage::Fractions => "fractions",
        }
    }

    pub fn from_name(name: &str) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of one stage, as recorded by [`ShorthandConverter::trace`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTrace {
    pub stage: Stage,
    pub output: String,
}

/// Shorthand to LaTeX converter
#[derive(Debug, Clone)]
pub struct ShorthandConverter {
    constants: ShorthandTable,
    functions: FunctionSet,
    function_rewriter: FunctionRewriter,
    options: ConvertOptions,
}

impl Default for ShorthandConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShorthandConverter {
    /// Converter with the default tables and options
    pub fn new() -> Self {
        Self {
            constants: ShorthandTable::default(),
            functions: FunctionSet::default(),
            function_rewriter: FunctionRewriter::default(),
            options: ConvertOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the constant table
    pub fn with_constants(mut self, constants: ShorthandTable) -> Self {
        self.constants = constants;
        self
    }

    /// Replace the function set
    pub fn with_functions(mut self, functions: FunctionSet) -> ConversionResult<Self> {
        self.function_rewriter = FunctionRewriter::new(&functions)?;
        self.functions = functions;
        Ok(self)
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn constants(&self) -> &ShorthandTable {
        &self.constants
    }

    pub fn functions(&self) -> &FunctionSet {
        &self.functions
    }

    /// Run a single stage on `input`
    pub fn run_stage(&self, stage: Stage, input: &str) -> ConversionResult<String> {
        self.run_stage_using(stage, input, &self.options)
    }

    fn run_stage_using(
        &self,
        stage: Stage,
        input: &str,
        options: &ConvertOptions,
    ) -> ConversionResult<String> {
        let depth = options.depth_limit();
        match stage {
            Stage::Constants => Ok(substitute_constants(
                input,
                &self.constants,
                options.constant_matching,
            )),
            Stage::QuotedText => Ok(escape_quoted_text(input)),
            Stage::Roots => Ok(rewrite_roots(input)),
            Stage::Functions => Ok(self.function_rewriter.rewrite(input)),
            Stage::Logarithms => Ok(rewrite_logarithms(input)),
            Stage::Exponents => rewrite_exponents(input, depth),
            Stage::Fractions => rewrite_fractions(input, depth),
        }
    }

    /// Run the stages up to and including `last`
    pub fn convert_until(&self, input: &str, last: Stage) -> ConversionResult<String> {
        self.convert_until_using(input, last, &self.options)
    }

    /// [`ShorthandConverter::convert_until`] with options other than the
    /// converter's own. The tables are borrowed, not copied.
    pub(crate) fn convert_until_using(
        &self,
        input: &str,
        last: Stage,
        options: &ConvertOptions,
    ) -> ConversionResult<String> {
        check_input_len(input, options)?;
        let mut text = input.to_string();
        for stage in Stage::ALL.into_iter().take_while(|s| *s <= last) {
            tracing::debug!(stage = stage.name(), "Running stage");
            text = self.run_stage_using(stage, &text, options)?;
        }
        Ok(text)
    }

    /// Run the full pipeline, failing on overflow
    pub fn try_convert(&self, input: &str) -> ConversionResult<String> {
        self.convert_until(input, Stage::Fractions)
    }

    /// Run the full pipeline and record every intermediate result
    pub fn trace(&self, input: &str) -> ConversionResult<Vec<StageTrace>> {
        check_input_len(input, &self.options)?;
        let mut steps: Vec<StageTrace> = Vec::with_capacity(Stage::ALL.len());
        for stage in Stage::ALL {
            let previous = steps.last().map_or(input, |s| s.output.as_str());
            let output = self.run_stage(stage, previous)?;
            steps.push(StageTrace { stage, output });
        }
        Ok(steps)
    }

    /// Run the full pipeline without failing.
    ///
    /// A stage that overflows passes its input through and the remaining
    /// stages still run; each such event is reported as a warning. Input
    /// over the length limit is returned unchanged.
    pub fn convert_with_diagnostics(&self, input: &str) -> ConversionOutput {
        self.convert_with_diagnostics_using(input, &self.options)
    }

    /// [`ShorthandConverter::convert_with_diagnostics`] with options other
    /// than the converter's own
    pub(crate) fn convert_with_diagnostics_using(
        &self,
        input: &str,
        options: &ConvertOptions,
    ) -> ConversionOutput {
        if let Err(e) = check_input_len(input, options) {
            tracing::warn!(error = %e, "Input passed through unchanged");
            return ConversionOutput::with_warnings(
                input.to_string(),
                vec![ConversionWarning::from(&e)],
            );
        }

        let mut warnings = Vec::new();
        let mut text = input.to_string();
        for stage in Stage::ALL {
            tracing::debug!(stage = stage.name(), "Running stage");
            match self.run_stage_using(stage, &text, options) {
                Ok(output) => text = output,
                Err(e) => {
                    tracing::warn!(stage = stage.name(), error = %e, "Stage skipped");
                    warnings.push(ConversionWarning::from(&e));
                }
            }
        }
        ConversionOutput::with_warnings(text, warnings)
    }

    /// Run the full pipeline. Never fails; see
    /// [`ShorthandConverter::convert_with_diagnostics`].
    pub fn convert(&self, input: &str) -> String {
        self.convert_with_diagnostics(input).content
    }
}

fn check_input_len(input: &str, options: &ConvertOptions) -> ConversionResult<()> {
    match options.max_input_len {
        Some(limit) if input.chars().count() > limit => Err(ConversionError::input_too_long(limit)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::ConstantMatching;
    use crate::utils::error::WarningKind;

    #[test]
    fn test_stage_names_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_name(stage.name()), Some(stage));
        }
        assert_eq!(Stage::from_name("parser"), None);
    }

    #[test]
    fn test_stage_order() {
        assert!(Stage::Constants < Stage::QuotedText);
        assert!(Stage::Exponents < Stage::Fractions);
    }

    #[test]
    fn test_full_pipeline() {
        let converter = ShorthandConverter::new();
        assert_eq!(converter.convert("sqrt(4)"), r"\sqrt{4}");
        assert_eq!(converter.convert("x^2^3"), "x^{2^{3}}");
        assert_eq!(converter.convert("(a+b)/(c+d)"), r"\frac{a+b}{c+d}");
    }

    #[test]
    fn test_convert_until() {
        let converter = ShorthandConverter::new();
        let input = "sqrt(pi)^2/3";
        assert_eq!(converter.convert_until(input, Stage::Constants).unwrap(), r"sqrt(\pi)^2/3");
        assert_eq!(converter.convert_until(input, Stage::Roots).unwrap(), r"\sqrt{\pi}^2/3");
    }

    #[test]
    fn test_trace_records_every_stage() {
        let converter = ShorthandConverter::new();
        let steps = converter.trace("log(e,x)").unwrap();
        assert_eq!(steps.len(), Stage::ALL.len());
        assert_eq!(steps[0].stage, Stage::Constants);
        let logs = steps.iter().find(|s| s.stage == Stage::Logarithms).unwrap();
        assert_eq!(logs.output, r"\ln{x}");
        assert_eq!(steps.last().unwrap().output, converter.convert("log(e,x)"));
    }

    #[test]
    fn test_run_stage_in_isolation() {
        let converter = ShorthandConverter::new();
        assert_eq!(converter.run_stage(Stage::Exponents, "pi^2").unwrap(), "pi^{2}");
    }

    #[test]
    fn test_overflow_falls_back_per_stage() {
        let converter = ShorthandConverter::new().with_options(ConvertOptions {
            max_depth: 1,
            ..Default::default()
        });
        let input = "x^2^3 + 1/2";
        assert!(converter.try_convert(input).unwrap_err().is_overflow());

        let output = converter.convert_with_diagnostics(input);
        assert_eq!(output.content, r"x^2^3 + \frac{1}{2}");
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].kind, WarningKind::TransformOverflow);
        assert_eq!(output.warnings[0].stage, Some(Stage::Exponents));
    }

    #[test]
    fn test_input_length_limit() {
        let converter = ShorthandConverter::new().with_options(ConvertOptions::bounded(8, 4));
        assert!(converter.try_convert("x^2 + 1").is_err());
        let output = converter.convert_with_diagnostics("x^2 + 1");
        assert_eq!(output.content, "x^2 + 1");
        assert_eq!(output.warnings[0].kind, WarningKind::InputTooLong);
        assert_eq!(converter.convert("x^2"), "x^{2}");
    }

    #[test]
    fn test_custom_configuration() {
        let converter = ShorthandConverter::new()
            .with_constants(ShorthandTable::empty().with("alpha", r"\alpha"))
            .with_functions(FunctionSet::new(["exp"]).unwrap())
            .unwrap()
            .with_options(ConvertOptions {
                constant_matching: ConstantMatching::WordBoundary,
                ..Default::default()
            });
        assert_eq!(converter.convert("exp(alpha) + pi"), r"\exp{\alpha} + pi");
        assert_eq!(converter.convert("sin(x)"), "sin(x)");
        assert!(converter.functions().contains("exp"));
        assert_eq!(converter.constants().len(), 1);
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShorthandConverter>();
    }
}
