//! Shading and pattern operators.
//!
//! Handles: shfill, makepattern
//!
//! - shfill: Axial (type 2) and radial (type 3) shadings become SVG
//!   gradients painted over a rectangle or circle
//! - makepattern: Runs the paint procedure in a nested interpreter and
//!   wraps the resulting paths in a `<pattern>` tile

use tracing::{debug, warn};

use crate::interp::interpreter::Interpreter;
use crate::model::color::components_to_color;
use crate::model::objects::{dict_get, number_list};
use crate::model::{Dict, PaintMode, PatternRef, StackValue};
use crate::utils::num_fmt;

const DEFAULT_TILE_BBOX: [f64; 4] = [0.0, 0.0, 20.0, 20.0];
const DEFAULT_TILE_STEP: f64 = 20.0;

fn number_entry(dict: &Dict, key: &str) -> Option<f64> {
    dict_get(dict, key).and_then(|value| value.as_number())
}

fn list_entry(dict: &Dict, key: &str) -> Option<Vec<f64>> {
    dict_get(dict, key).and_then(|value| number_list(&value))
}

/// The two end colors of a shading's interpolation function.
fn end_colors(shading: &Dict) -> (String, String) {
    let function = dict_get(shading, "Function").and_then(|value| value.as_dict().cloned());
    let color = |key: &str, default: &[f64]| {
        let components = function
            .as_ref()
            .and_then(|f| list_entry(f, key))
            .unwrap_or_else(|| default.to_vec());
        components_to_color(&components)
    };
    (color("C0", &[1.0, 1.0, 1.0]), color("C1", &[0.0, 0.0, 0.0]))
}

fn gradient_stops(start: &str, end: &str) -> String {
    format!(
        "<stop offset=\"0\" stop-color=\"{start}\" />\n<stop offset=\"1\" stop-color=\"{end}\" />"
    )
}

impl Interpreter {
    /// Paints a shading dictionary.
    ///
    /// PostScript operator: `shfill`
    pub fn do_shfill(&mut self, shading: &Dict) {
        let id = self.fresh_id("grad");
        let (start, end) = end_colors(shading);
        let coords = list_entry(shading, "Coords").unwrap_or_default();
        let coord = |i: usize| coords.get(i).copied().unwrap_or(0.0);

        let d = match number_entry(shading, "ShadingType") {
            Some(t) if t == 2.0 => {
                let (x1, y1, x2, y2) = (coord(0), coord(1), coord(2), coord(3));
                self.scene.add_definition(format!(
                    "<linearGradient id=\"{id}\" x1=\"{}%\" y1=\"{}%\" x2=\"{}%\" y2=\"{}%\">\n{}\n</linearGradient>",
                    num_fmt(x1),
                    num_fmt(y1),
                    num_fmt(x2),
                    num_fmt(y2),
                    gradient_stops(&start, &end)
                ));
                let (min_x, min_y) = (x1.min(x2), y1.min(y2));
                let (max_x, max_y) = (
                    min_x + (x2 - x1).abs(),
                    min_y + (y2 - y1).abs(),
                );
                format!(
                    "M {0} {1} L {2} {1} L {2} {3} L {0} {3} Z",
                    num_fmt(min_x),
                    num_fmt(min_y),
                    num_fmt(max_x),
                    num_fmt(max_y)
                )
            }
            Some(t) if t == 3.0 => {
                let (cx, cy, r) = (coord(3), coord(4), coord(5));
                self.scene.add_definition(format!(
                    "<radialGradient id=\"{id}\">\n{}\n</radialGradient>",
                    gradient_stops(&start, &end)
                ));
                format!(
                    "M {0} {1} A {2} {2} 0 1 1 {3} {1} A {2} {2} 0 1 1 {0} {1} Z",
                    num_fmt(cx + r),
                    num_fmt(cy),
                    num_fmt(r),
                    num_fmt(cx - r)
                )
            }
            other => {
                warn!(shading_type = ?other, "unsupported shading type");
                self.scene.add_comment("shfill not fully implemented");
                return;
            }
        };

        self.scene
            .paint_path(&d, &self.gstate, PaintMode::FILL_ONLY, Some(&id));
        self.path = self.path.reset();
    }

    /// Builds a tiling pattern from `pattern` and pushes a reference to it.
    ///
    /// The paint procedure runs in its own interpreter; only the paths it
    /// paints end up in the tile. Beyond the configured nesting depth the
    /// tile is left empty.
    ///
    /// PostScript operator: `makepattern`
    pub fn do_makepattern(&mut self, pattern: Dict) {
        let id = self.fresh_id("pattern");
        let bbox = list_entry(&pattern, "BBox").unwrap_or_else(|| DEFAULT_TILE_BBOX.to_vec());
        let x_step = number_entry(&pattern, "XStep").unwrap_or(DEFAULT_TILE_STEP);
        let y_step = number_entry(&pattern, "YStep").unwrap_or(DEFAULT_TILE_STEP);

        if let Some(StackValue::Procedure(body)) = dict_get(&pattern, "PaintProc") {
            let tile = if self.depth >= self.options.max_pattern_depth {
                warn!(id = %id, depth = self.depth, "pattern nesting limit reached");
                String::new()
            } else {
                debug!(id = %id, depth = self.depth + 1, "evaluating paint procedure");
                let scene = Interpreter::nested(self.options.clone(), self.depth + 1).interpret(&body);
                scene
                    .shapes
                    .into_iter()
                    .filter(|shape| shape.starts_with("<path"))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            let at = |i: usize| bbox.get(i).copied().unwrap_or(0.0);
            self.scene.add_definition(format!(
                "<pattern id=\"{id}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" patternUnits=\"userSpaceOnUse\">\n{tile}\n</pattern>",
                num_fmt(at(0)),
                num_fmt(at(1)),
                num_fmt(x_step),
                num_fmt(y_step)
            ));
        }

        self.stack
            .push(StackValue::Pattern(PatternRef { id, dict: pattern }));
    }
}
