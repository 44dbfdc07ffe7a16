//! Shortex CLI - shorthand math to LaTeX converter

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use shortex::{
    diagnostics::{check_shorthand_with, format_diagnostics},
    to_display_block, ConstantMatching, ConversionOutput, ConversionWarning, ConvertOptions,
    ShorthandConfig, ShorthandConverter, Stage, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "stx")]
#[command(version)]
#[command(about = "Shortex - shorthand math notation to LaTeX converter", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    #[command(flatten)]
    table: TableArgs,

    /// Wrap the output in $$...$$ for the renderer
    #[arg(short, long)]
    display: bool,

    /// Maximum nesting depth for exponents and fractions
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(1..=MAX_DEPTH_CEILING as u64)
    )]
    max_depth: usize,

    /// Reject inputs longer than this many characters
    #[arg(long)]
    max_input_len: Option<usize>,

    /// Stop after this stage (for debugging the pipeline)
    #[arg(long, value_enum)]
    until: Option<StageArg>,

    /// Convert each line independently
    #[arg(short, long)]
    lines: bool,

    /// Strict mode: exit with error if any conversion warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored warning output
    #[arg(long)]
    no_color: bool,
}

/// Options that pick the shorthand tables
#[cfg(feature = "cli")]
#[derive(clap::Args, Clone)]
struct TableArgs {
    /// Load constants and function names from a TOML or JSON file
    #[arg(long, value_name = "FILE")]
    constants: Option<PathBuf>,

    /// Only replace constants that stand as whole words
    #[arg(short, long)]
    word_boundary: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check shorthand for fragments that will not convert
    Check {
        /// Input file to check
        input: Option<String>,

        #[command(flatten)]
        table: TableArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the output of every pipeline stage
    Trace {
        /// Input file to trace
        input: Option<String>,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Print the active constant table
    Constants {
        /// Load the table from a TOML or JSON file instead of the defaults
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Print as a TOML file that `--constants` accepts
        #[arg(long)]
        toml: bool,
    },

    /// Show version and feature info
    Info,
}

/// Pipeline stages, as accepted on the command line
#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum StageArg {
    Constants,
    QuotedText,
    Roots,
    Functions,
    Logarithms,
    Exponents,
    Fractions,
}

#[cfg(feature = "cli")]
impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Constants => Stage::Constants,
            StageArg::QuotedText => Stage::QuotedText,
            StageArg::Roots => Stage::Roots,
            StageArg::Functions => Stage::Functions,
            StageArg::Logarithms => Stage::Logarithms,
            StageArg::Exponents => Stage::Exponents,
            StageArg::Fractions => Stage::Fractions,
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shortex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let input = read_input(cli.input_file.as_deref())?;

    let options = ConvertOptions {
        max_depth: cli.max_depth,
        max_input_len: cli.max_input_len,
        ..Default::default()
    };
    let converter = build_converter(&cli.table, options)?;
    let until = cli.until.map(Stage::from);

    // Convert, collecting warnings
    let (result, warnings) = if cli.lines {
        let mut warnings = Vec::new();
        let mut lines = Vec::new();
        for line in input.lines() {
            let converted = convert_text(&converter, line, until);
            warnings.extend(converted.warnings);
            lines.push(if cli.display {
                to_display_block(&converted.content)
            } else {
                converted.content
            });
        }
        (lines.join("\n"), warnings)
    } else {
        let converted = convert_text(&converter, &input, until);
        let content = if cli.display {
            to_display_block(&converted.content)
        } else {
            converted.content
        };
        (content, converted.warnings)
    };

    // Print warnings to stderr (unless quiet mode)
    if !cli.quiet && !warnings.is_empty() {
        print_warnings_to_stderr(&warnings, !cli.no_color);
    }

    // Check strict mode
    if cli.strict && !warnings.is_empty() {
        eprintln!(
            "Error: {} conversion warning(s) in strict mode",
            warnings.len()
        );
        std::process::exit(1);
    }

    // Output
    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            writeln!(file, "{}", result)?;
            if warnings.is_empty() {
                eprintln!("✓ Output written to: {}", path);
            } else {
                eprintln!(
                    "⚠ Output written to: {} ({} warning(s))",
                    path,
                    warnings.len()
                );
            }
        }
        None => {
            println!("{}", result);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Check {
            input,
            table,
            no_color,
        } => {
            let content = read_input(input.as_deref())?;
            let converter = build_converter(&table, ConvertOptions::default())?;

            let result = check_shorthand_with(&content, &converter);
            let output = format_diagnostics(&result, !no_color);
            println!("{}", output);

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Trace { input, table } => {
            let content = read_input(input.as_deref())?;
            let converter = build_converter(&table, ConvertOptions::default())?;

            println!("{:>12}  {}", "input", content);
            match converter.trace(&content) {
                Ok(steps) => {
                    for step in steps {
                        println!("{:>12}  {}", step.stage.name(), step.output);
                    }
                }
                Err(e) => {
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Constants { file, toml } => {
            let table = match file {
                Some(path) => load_config(&path)?.table(),
                None => ShorthandConverter::new().constants().clone(),
            };

            if toml {
                let config = ShorthandConfig::from(&table);
                let text = toml::to_string(&config)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                print!("{}", text);
            } else {
                let width = table.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
                for (shorthand, markup) in table.iter() {
                    println!("{:<width$}  {}", shorthand, markup, width = width);
                }
            }
        }

        Commands::Info => {
            println!("Shortex - shorthand math notation to LaTeX converter");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Pipeline stages:");
            for stage in Stage::ALL {
                println!("  {}", stage);
            }
            println!();
            println!("Examples:");
            for example in ["sqrt(x)", "x^2^3", "(a+b)/(c+d)", "log(2,8)", "\"hello\""] {
                println!("  {:<14} => {}", example, shortex::transform(example));
            }
            println!();
        }
    }

    Ok(())
}

/// Read a file, or stdin when no path is given, dropping one trailing newline
#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    let mut buffer = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

#[cfg(feature = "cli")]
fn load_config(path: &Path) -> io::Result<ShorthandConfig> {
    ShorthandConfig::from_path(path).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

#[cfg(feature = "cli")]
fn build_converter(table: &TableArgs, mut options: ConvertOptions) -> io::Result<ShorthandConverter> {
    if table.word_boundary {
        options.constant_matching = ConstantMatching::WordBoundary;
    }
    let mut converter = ShorthandConverter::new().with_options(options);
    if let Some(ref path) = table.constants {
        let config = load_config(path)?;
        let functions = config
            .function_set()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        converter = converter
            .with_constants(config.table())
            .with_functions(functions)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    }
    Ok(converter)
}

/// Run the whole pipeline, or stop after `until`
#[cfg(feature = "cli")]
fn convert_text(converter: &ShorthandConverter, text: &str, until: Option<Stage>) -> ConversionOutput {
    match until {
        None => converter.convert_with_diagnostics(text),
        Some(stage) => match converter.convert_until(text, stage) {
            Ok(output) => ConversionOutput::new(output),
            Err(e) => {
                ConversionOutput::with_warnings(text.to_string(), vec![ConversionWarning::from(&e)])
            }
        },
    }
}

/// Print warnings to stderr with optional color coding.
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning], use_color: bool) {
    let color = if use_color { "\x1b[33m" } else { "" };
    let reset = if use_color { "\x1b[0m" } else { "" };

    eprintln!();
    eprintln!("{}Conversion Warnings ({}):{}", color, warnings.len(), reset);
    eprintln!();

    for warning in warnings {
        match warning.stage {
            Some(stage) => eprintln!(
                "  {}[{}]{} {}: {}",
                color, warning.kind, reset, stage, warning.message
            ),
            None => eprintln!("  {}[{}]{} {}", color, warning.kind, reset, warning.message),
        }
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install shortex --features cli");
    eprintln!("  stx [OPTIONS] [INPUT_FILE]");
}
