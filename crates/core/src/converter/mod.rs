//! Output converters.
//!
//! - `svg`: assembles an interpreter scene into a standalone SVG document

mod svg;

pub use svg::{
    BoundingBox, DEFAULT_HEIGHT, DEFAULT_WIDTH, extract_bounding_box, generate_svg,
};
