//! pssvg - PostScript and EPS to SVG conversion.
//!
//! The pipeline is: lex the source into tokens, run them on a small
//! PostScript stack machine that records SVG fragments, then assemble the
//! fragments into a document sized by the `%%BoundingBox` comment.

pub mod api;
pub mod converter;
pub mod error;
pub mod interp;
pub mod model;
pub mod parser;
pub mod utils;

// Re-export high_level for convenience
pub use api::high_level;
pub use api::{BatchEntry, ConvertOptions, convert, convert_dir, convert_file, convert_with_options};

pub use error::{PsSvgError, Result};
pub use interp::{Interpreter, InterpreterOptions, Scene};
pub use parser::{Token, TokenKind, tokenize};
pub use utils::Matrix;
