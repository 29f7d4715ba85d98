//! PostScript interpretation and scene output.
//!
//! This module contains:
//! - `interpreter`: the stack machine and operator dispatch
//! - `stream`: token source with procedure expansion frames
//! - `builder`: SVG path data construction
//! - `device`: scene accumulator and `<path>` element rendering
//! - `params`: interpreter limits
//! - `ops`: Operator implementations by category

pub mod builder;
pub mod device;
pub mod interpreter;
pub mod ops;
pub mod params;
pub mod stream;

// Re-export main types for convenience
pub use builder::{PathBuilder, Segment};
pub use device::Scene;
pub use interpreter::Interpreter;
pub use ops::Operator;
pub use params::InterpreterOptions;
pub use stream::TokenStream;
