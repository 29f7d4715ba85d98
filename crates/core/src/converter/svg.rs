//! SVG document assembly.
//!
//! Wraps an interpreter [`Scene`] into a standalone SVG document. The
//! canvas comes from the `%%BoundingBox` DSC comment when present, and all
//! content sits inside a group that flips the y axis so PostScript's
//! lower-left origin lands at the bottom of the SVG canvas.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::interp::Scene;
use crate::utils::num_fmt;

static BBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"%%BoundingBox:\s*([-+0-9.eE]+)\s+([-+0-9.eE]+)\s+([-+0-9.eE]+)\s+([-+0-9.eE]+)",
    )
    .expect("bounding box pattern is valid")
});

/// Canvas used when the document declares no bounding box.
pub const DEFAULT_WIDTH: f64 = 1920.0;
pub const DEFAULT_HEIGHT: f64 = 1080.0;

/// `%%BoundingBox: llx lly urx ury`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }
}

/// Find the first `%%BoundingBox` comment in `source`.
///
/// Returns `None` when the comment is missing or one of its four fields is
/// not a number (for example `(atend)`).
pub fn extract_bounding_box(source: &str) -> Option<BoundingBox> {
    let caps = BBOX_RE.captures(source)?;
    let field = |i: usize| caps.get(i)?.as_str().parse::<f64>().ok();
    Some(BoundingBox {
        llx: field(1)?,
        lly: field(2)?,
        urx: field(3)?,
        ury: field(4)?,
    })
}

/// Render the complete SVG document.
///
/// Without a bounding box the canvas is `default_size` (width, height)
/// with its origin at 0 0.
pub fn generate_svg(scene: &Scene, bbox: Option<&BoundingBox>, default_size: (f64, f64)) -> String {
    let (view_box, height) = match bbox {
        Some(bbox) => {
            let (width, height) = (num_fmt(bbox.width()), num_fmt(bbox.height()));
            (
                format!(
                    "viewBox=\"{} {} {width} {height}\" width=\"{width}\" height=\"{height}\"",
                    num_fmt(bbox.llx),
                    num_fmt(bbox.lly)
                ),
                height,
            )
        }
        None => {
            let (width, height) = (num_fmt(default_size.0), num_fmt(default_size.1));
            (
                format!("viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\""),
                height,
            )
        }
    };

    let defs = if scene.definitions.is_empty() {
        String::new()
    } else {
        format!("<defs>\n{}\n</defs>", scene.definitions.join("\n"))
    };
    let shapes = scene.shapes.join("\n");
    let texts = scene.texts.join("\n");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" {view_box}>\n\
         {defs}\n\
         <g transform=\"translate(0 {height}) scale(1 -1)\">\n{shapes}\n{texts}</g>\n\
         </svg>"
    )
}
