//! pssvg - Convert PostScript and EPS files to SVG
//!
//! A command line tool for converting single files, whole directories, or
//! dumping the intermediate scene the interpreter produces.

use anyhow::{Context, Result};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use pssvg_core::api::{BatchEntry, ConvertOptions, convert_dir, convert_file, interpret, read_source};
use pssvg_core::interp::InterpreterOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// A command line tool for converting PostScript and EPS files to SVG.
#[derive(Parser, Debug)]
#[command(name = "pssvg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue, global = true)]
    debug: bool,

    #[command(flatten)]
    options: OptionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one file; prints to stdout when OUTPUT is omitted
    Convert {
        /// PostScript or EPS input file
        input: PathBuf,
        /// SVG output file
        output: Option<PathBuf>,
    },
    /// Convert every .ps/.eps file in a directory
    Batch {
        /// Directory containing input files
        input_dir: PathBuf,
        /// Directory for SVG files (defaults to the input directory)
        output_dir: Option<PathBuf>,
    },
    /// Print the interpreter scene (definitions, shapes, texts) as JSON
    Scene {
        /// PostScript or EPS input file
        input: PathBuf,
    },
}

/// Conversion limits and canvas defaults.
#[derive(ClapArgs, Debug)]
struct OptionArgs {
    /// Stop interpreting after this many tokens
    #[arg(long = "max-operations", global = true)]
    max_operations: Option<usize>,

    /// Maximum nesting of user procedure calls
    #[arg(long = "max-expansion-depth", global = true)]
    max_expansion_depth: Option<usize>,

    /// Maximum nesting of pattern paint procedures
    #[arg(long = "max-pattern-depth", global = true, default_value = "16")]
    max_pattern_depth: usize,

    /// Maximum nesting of array and dictionary literals
    #[arg(long = "max-literal-depth", global = true, default_value = "256")]
    max_literal_depth: usize,

    /// Canvas width when the input has no %%BoundingBox
    #[arg(long, global = true, default_value = "1920")]
    width: f64,

    /// Canvas height when the input has no %%BoundingBox
    #[arg(long, global = true, default_value = "1080")]
    height: f64,

    /// Worker threads for batch conversion (default: all cores)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,
}

impl OptionArgs {
    fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            interpreter: InterpreterOptions {
                max_operations: self.max_operations,
                max_expansion_depth: self.max_expansion_depth,
                max_pattern_depth: self.max_pattern_depth,
                max_literal_depth: self.max_literal_depth,
            },
            default_width: self.width,
            default_height: self.height,
            threads: self.threads,
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_convert(input: PathBuf, output: Option<PathBuf>, options: &ConvertOptions) -> Result<()> {
    let svg = convert_file(&input, output.as_deref(), options)
        .with_context(|| format!("failed to convert {}", input.display()))?;
    match output {
        Some(output) => eprintln!("Converted {} -> {}", input.display(), output.display()),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Returns whether every file converted.
fn run_batch(input_dir: PathBuf, output_dir: Option<PathBuf>, options: &ConvertOptions) -> Result<bool> {
    let entries = convert_dir(&input_dir, output_dir.as_deref(), options)?;
    let failed = report_batch(&input_dir, &entries, &mut io::stdout().lock())?;
    Ok(failed == 0)
}

/// Print one status line per entry plus totals; returns the failure count.
fn report_batch(input_dir: &Path, entries: &[BatchEntry], out: &mut impl Write) -> io::Result<usize> {
    if entries.is_empty() {
        writeln!(out, "No .ps or .eps files found in {}", input_dir.display())?;
        return Ok(0);
    }
    writeln!(out, "Found {} file(s) to convert", entries.len())?;

    let mut failed = 0usize;
    for entry in entries {
        match &entry.result {
            Ok(()) => writeln!(
                out,
                "  ok      {} -> {}",
                entry.input.display(),
                entry.output.display()
            )?,
            Err(e) => {
                failed += 1;
                writeln!(out, "  FAILED  {}: {e}", entry.input.display())?;
            }
        }
    }
    writeln!(out, "{} converted, {} failed", entries.len() - failed, failed)?;
    Ok(failed)
}

fn run_scene(input: PathBuf, options: &ConvertOptions) -> Result<()> {
    let source = read_source(&input)?;
    let scene = interpret(&source, options);
    let json = serde_json::to_string_pretty(&scene).context("failed to serialize scene")?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);
    let options = args.options.to_options();

    let outcome = match args.command {
        Command::Convert { input, output } => run_convert(input, output, &options).map(|()| true),
        Command::Batch {
            input_dir,
            output_dir,
        } => run_batch(input_dir, output_dir, &options),
        Command::Scene { input } => run_scene(input, &options).map(|()| true),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
