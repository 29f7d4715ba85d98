//! High-level conversion API.
//!
//! Provides the main public entry points:
//! - `convert()` - PostScript text to SVG text
//! - `convert_file()` - Read a file, convert it, optionally write the result
//! - `convert_dir()` - Convert every `.ps`/`.eps` file in a directory in parallel

use std::fs;
use std::path::{Path, PathBuf};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::debug;

use crate::converter::{DEFAULT_HEIGHT, DEFAULT_WIDTH, extract_bounding_box, generate_svg};
use crate::error::{PsSvgError, Result};
use crate::interp::{Interpreter, InterpreterOptions, Scene};
use crate::parser::tokenize;

const INPUT_EXTENSIONS: [&str; 2] = ["ps", "eps"];

fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Options for conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Interpreter limits.
    pub interpreter: InterpreterOptions,

    /// Canvas width when the document has no `%%BoundingBox`.
    pub default_width: f64,

    /// Canvas height when the document has no `%%BoundingBox`.
    pub default_height: f64,

    /// Worker threads for `convert_dir`. None uses all available cores.
    pub threads: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            interpreter: InterpreterOptions::default(),
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            threads: None,
        }
    }
}

/// Outcome of converting one file in a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<()>,
}

impl BatchEntry {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Convert PostScript source to an SVG document with default options.
///
/// Never fails: unsupported constructs degrade into placeholders and
/// comments inside the output.
///
/// # Example
/// ```
/// let svg = pssvg_core::convert("%%BoundingBox: 0 0 10 10\n0 0 moveto 10 10 lineto stroke");
/// assert!(svg.contains("viewBox=\"0 0 10 10\""));
/// ```
pub fn convert(source: &str) -> String {
    convert_with_options(source, &ConvertOptions::default())
}

/// Convert PostScript source to an SVG document.
pub fn convert_with_options(source: &str, options: &ConvertOptions) -> String {
    let bbox = extract_bounding_box(source);
    let scene = interpret(source, options);
    generate_svg(
        &scene,
        bbox.as_ref(),
        (options.default_width, options.default_height),
    )
}

/// Run the interpreter over `source` and return the raw scene.
pub fn interpret(source: &str, options: &ConvertOptions) -> Scene {
    let tokens = tokenize(source);
    debug!(tokens = tokens.len(), "tokenized input");
    Interpreter::with_options(options.interpreter.clone()).interpret(&tokens)
}

/// Read a PostScript file as text, replacing invalid UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(PsSvgError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|e| PsSvgError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Convert the file at `input`, writing the SVG to `output` when given.
///
/// Returns the SVG text in either case.
pub fn convert_file(input: &Path, output: Option<&Path>, options: &ConvertOptions) -> Result<String> {
    let source = read_source(input)?;
    let svg = convert_with_options(&source, options);
    if let Some(output) = output {
        fs::write(output, &svg).map_err(|e| PsSvgError::io(output, e))?;
    }
    Ok(svg)
}

fn is_postscript(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                INPUT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
}

/// List `.ps` and `.eps` files directly inside `dir`, sorted by path.
pub fn find_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(PsSvgError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(PsSvgError::NotADirectory(dir.to_path_buf()));
    }
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PsSvgError::io(dir, e))? {
        let path = entry.map_err(|e| PsSvgError::io(dir, e))?.path();
        if is_postscript(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Convert every PostScript file in `input_dir`.
///
/// Each `name.ps` becomes `name.svg` in `output_dir` (created if missing),
/// or next to the input when no output directory is given. A failing file
/// is reported in its entry and does not stop the rest of the batch.
pub fn convert_dir(
    input_dir: &Path,
    output_dir: Option<&Path>,
    options: &ConvertOptions,
) -> Result<Vec<BatchEntry>> {
    let inputs = find_inputs(input_dir)?;
    let target_dir = output_dir.unwrap_or(input_dir);
    if !inputs.is_empty() {
        fs::create_dir_all(target_dir).map_err(|e| PsSvgError::io(target_dir, e))?;
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or_else(default_thread_count))
        .build()
        .map_err(|e| PsSvgError::ConversionError(e.to_string()))?;

    let mut entries: Vec<BatchEntry> = pool.install(|| {
        inputs
            .into_par_iter()
            .map(|input| {
                let mut output = target_dir.join(input.file_name().unwrap_or_default());
                output.set_extension("svg");
                let result = convert_file(&input, Some(&output), options).map(|_| ());
                debug!(input = %input.display(), ok = result.is_ok(), "converted");
                BatchEntry {
                    input,
                    output,
                    result,
                }
            })
            .collect()
    });

    entries.sort_by(|a, b| a.input.cmp(&b.input));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.default_width, 1920.0);
        assert_eq!(options.default_height, 1080.0);
        assert_eq!(options.interpreter.max_pattern_depth, 16);
    }

    #[test]
    fn test_custom_default_canvas() {
        let options = ConvertOptions {
            default_width: 300.0,
            default_height: 200.0,
            ..ConvertOptions::default()
        };
        let svg = convert_with_options("", &options);
        assert!(svg.contains(r#"viewBox="0 0 300 200" width="300" height="200""#));
    }
}
