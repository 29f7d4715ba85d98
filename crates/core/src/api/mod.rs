//! High-level API module for PostScript to SVG conversion.
//!
//! # Example
//!
//! ```
//! use pssvg_core::api::{ConvertOptions, convert_with_options};
//!
//! let svg = convert_with_options("0 0 moveto 10 10 lineto stroke", &ConvertOptions::default());
//! assert!(svg.starts_with("<?xml"));
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    BatchEntry, ConvertOptions, convert, convert_dir, convert_file, convert_with_options,
    find_inputs, interpret, read_source,
};
