//! Data model types - stack values, graphics state and colors.
//!
//! - `objects` - Operand stack values (StackValue, Dict, PatternRef)
//! - `state` - Graphics state (GraphicsState, ClipLayer, PaintMode)
//! - `color` - Conversion of gray/RGB/CMYK operands to SVG colors

pub mod color;
pub mod objects;
pub mod state;

// Re-export main types for convenience
pub use color::ColorSpace;
pub use objects::{Dict, PatternRef, StackValue};
pub use state::{ClipLayer, GraphicsState, PaintMode};
