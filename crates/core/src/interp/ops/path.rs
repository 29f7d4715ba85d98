//! Path construction, painting and clipping operators.
//!
//! Handles: newpath, moveto, rmoveto, lineto, rlineto, curveto, rcurveto,
//! closepath, arc, stroke, fill, eofill, evenodd, clip
//!
//! Path construction:
//! - moveto/rmoveto: Start a subpath, also marks where `show` places text
//! - lineto/rlineto: Straight segments
//! - curveto/rcurveto: Cubic Bezier segments
//! - arc: Circular arc as SVG elliptical arc commands
//!
//! Path painting:
//! - stroke: Stroke only
//! - fill/eofill/evenodd: Fill only, always with the nonzero rule

use crate::interp::builder::Segment;
use crate::interp::interpreter::Interpreter;
use crate::interp::ops::graphics_state::clip_path_definition;
use crate::interp::stream::TokenStream;
use crate::model::{ClipLayer, PaintMode};
use crate::utils::TRANSFORM_EPSILON;

impl Interpreter {
    // ========================================================================
    // Path Construction Operators
    // ========================================================================

    /// Discards the current path.
    ///
    /// PostScript operator: `newpath`
    pub fn do_newpath(&mut self) {
        self.path = self.path.reset();
    }

    /// PostScript operator: `moveto`
    pub fn do_moveto(&mut self, x: f64, y: f64) {
        self.path.move_to(x, y);
        self.current_point = (x, y);
        self.gstate.last_text_position = Some((x, y));
    }

    /// PostScript operator: `rmoveto`
    pub fn do_rmoveto(&mut self, dx: f64, dy: f64) {
        self.path.move_to_rel(dx, dy);
        let (x, y) = self.current_point;
        self.current_point = (x + dx, y + dy);
        self.gstate.last_text_position = Some(self.current_point);
    }

    /// Appends a straight segment.
    ///
    /// When this completes a bare `moveto lineto` pair and the next operator
    /// neither extends the path nor restyles it, the pair is stroked on its
    /// own right away.
    ///
    /// PostScript operator: `lineto`
    pub fn do_lineto(&mut self, x: f64, y: f64, stream: &TokenStream) {
        self.path.line_to(x, y);
        self.current_point = (x, y);
        if self.path.is_simple_line() && Self::ends_simple_line(stream) {
            self.flush_path(PaintMode::STROKE_ONLY);
        }
    }

    /// PostScript operator: `rlineto`
    pub fn do_rlineto(&mut self, dx: f64, dy: f64) {
        self.path.line_to_rel(dx, dy);
        let (x, y) = self.current_point;
        self.current_point = (x + dx, y + dy);
    }

    /// Appends a cubic Bezier curve ending at (x3, y3).
    ///
    /// PostScript operator: `curveto`
    pub fn do_curveto(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.path.curve_to(x1, y1, x2, y2, x3, y3);
        self.current_point = (x3, y3);
    }

    /// PostScript operator: `rcurveto`
    pub fn do_rcurveto(&mut self, dx1: f64, dy1: f64, dx2: f64, dy2: f64, dx3: f64, dy3: f64) {
        self.path.curve_to_rel(dx1, dy1, dx2, dy2, dx3, dy3);
        let (x, y) = self.current_point;
        self.current_point = (x + dx3, y + dy3);
    }

    /// Closes the subpath unless the path is empty or already closed.
    ///
    /// PostScript operator: `closepath`
    pub fn do_closepath(&mut self) {
        if !self.path.is_empty() && !self.path.is_closed() {
            self.path.close();
        }
    }

    /// Appends a counter-clockwise arc of radius `r` around (x, y) from
    /// `ang1` to `ang2` degrees.
    ///
    /// A sweep that is a whole number of turns is drawn as two half arcs
    /// through the opposite point and closed. A `moveto` to the center
    /// immediately before the arc is dropped.
    ///
    /// PostScript operator: `arc`
    pub fn do_arc(&mut self, x: f64, y: f64, r: f64, ang1: f64, ang2: f64) {
        let (rx, ry) = if self.gstate.needs_group() {
            (r.abs(), r.abs())
        } else {
            let (sx, sy) = self.gstate.ctm.axis_scales();
            ((r * sx).abs(), (r * sy).abs())
        };
        let point_at = |degrees: f64| {
            let (sin, cos) = degrees.to_radians().sin_cos();
            (x + r * cos, y + r * sin)
        };
        let start = point_at(ang1);
        let end = point_at(ang2);

        let (cx, cy) = self.path.transform_point(x, y);
        if let Some(Segment::MoveTo(mx, my)) = self.path.last()
            && (mx - cx).abs() < TRANSFORM_EPSILON
            && (my - cy).abs() < TRANSFORM_EPSILON
        {
            self.path.pop_last();
        }
        self.path.move_to(start.0, start.1);

        let turns = (ang2 - ang1).abs() % 360.0;
        if turns < TRANSFORM_EPSILON || 360.0 - turns < TRANSFORM_EPSILON {
            let mid = point_at((ang1 + 180.0).rem_euclid(360.0));
            self.path.ellipse_to(rx, ry, 0.0, true, true, mid.0, mid.1);
            self.path
                .ellipse_to(rx, ry, 0.0, true, true, start.0, start.1);
            self.path.close();
        } else {
            let sweep = (ang2 - ang1).rem_euclid(360.0);
            self.path
                .ellipse_to(rx, ry, 0.0, sweep > 180.0, sweep > 0.0, end.0, end.1);
        }
        self.current_point = end;
    }

    // ========================================================================
    // Path Painting Operators
    // ========================================================================

    /// PostScript operator: `stroke`
    pub fn do_stroke(&mut self) {
        self.flush_path(PaintMode::STROKE_ONLY);
    }

    /// PostScript operators: `fill`, `eofill`, `evenodd`
    pub fn do_fill(&mut self) {
        self.flush_path(PaintMode::FILL_ONLY);
    }

    // ========================================================================
    // Clipping
    // ========================================================================

    /// Registers the current path as a clip layer and starts a new path.
    /// An empty path leaves the clip unchanged.
    ///
    /// PostScript operator: `clip`
    pub fn do_clip(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let d = self.path.to_path();
        let id = self.fresh_id("clip");
        self.scene.add_definition(clip_path_definition(&id, &d));
        self.gstate.clip_stack.push(ClipLayer { id, path: d });
        self.path = self.path.reset();
        self.update_path_transform();
    }
}

#[cfg(test)]
mod tests {
    use crate::interp::interpreter::Interpreter;
    use crate::parser::tokenize;

    fn shapes(source: &str) -> Vec<String> {
        Interpreter::new().interpret(&tokenize(source)).shapes
    }

    #[test]
    fn test_closed_square_is_one_stroke() {
        let out = shapes("newpath 10 10 moveto 90 10 lineto 90 90 lineto 10 90 lineto closepath stroke");
        assert_eq!(
            out,
            vec![r#"<path d="M 10 10 L 90 10 L 90 90 L 10 90 Z" fill="none" stroke="black" />"#]
        );
    }

    #[test]
    fn test_independent_lines_are_separate_paths() {
        let out = shapes("10 10 moveto 50 50 lineto stroke 20 20 moveto 60 60 lineto stroke");
        assert_eq!(out.len(), 2);
        assert!(out[0].contains(r#"d="M 10 10 L 50 50""#));
        assert!(out[1].contains(r#"d="M 20 20 L 60 60""#));
    }

    #[test]
    fn test_style_change_keeps_line_open() {
        let out = shapes("0 0 moveto 10 0 lineto 2 setlinewidth stroke");
        assert_eq!(
            out,
            vec![r#"<path d="M 0 0 L 10 0" fill="none" stroke="black" stroke-width="2" />"#]
        );
    }

    #[test]
    fn test_closepath_not_doubled() {
        let out = shapes("0 0 moveto 1 0 lineto 1 1 lineto closepath closepath fill");
        assert_eq!(
            out,
            vec![r#"<path d="M 0 0 L 1 0 L 1 1 Z" fill="black" stroke="none" />"#]
        );
    }

    #[test]
    fn test_unterminated_path_flushed_as_stroke() {
        let out = shapes("0 0 moveto 5 5 lineto 9 9 lineto");
        assert_eq!(
            out,
            vec![r#"<path d="M 0 0 L 5 5 L 9 9" fill="none" stroke="black" />"#]
        );
    }

    #[test]
    fn test_curves() {
        let out = shapes("0 0 moveto 1 2 3 4 5 6 curveto 1 1 2 2 3 3 rcurveto stroke");
        assert_eq!(
            out,
            vec![r#"<path d="M 0 0 C 1 2 3 4 5 6 c 1 1 2 2 3 3" fill="none" stroke="black" />"#]
        );
    }

    #[test]
    fn test_full_circle_arc() {
        let out = shapes("newpath 50 50 moveto 50 50 10 0 360 arc stroke");
        assert_eq!(
            out,
            vec![r#"<path d="M 60 50 A 10 10 0 1 1 40 50 A 10 10 0 1 1 60 50 Z" fill="none" stroke="black" />"#]
        );
    }

    #[test]
    fn test_full_circle_independent_of_start_angle() {
        let a = shapes("50 50 10 90 450 arc stroke");
        let b = shapes("50 50 10 90 -270 arc stroke");
        assert_eq!(a, b);
        assert!(a[0].contains(" Z\""));
        assert_eq!(a[0].matches(" A ").count(), 2);
    }

    #[test]
    fn test_partial_arc_flags() {
        let out = shapes("0 0 10 0 90 arc stroke");
        assert_eq!(
            out,
            vec![r#"<path d="M 10 0 A 10 10 0 0 1 0 10" fill="none" stroke="black" />"#]
        );
        let large = shapes("0 0 10 0 270 arc stroke");
        assert!(large[0].contains("A 10 10 0 1 1 0 -10"));
    }

    #[test]
    fn test_arc_under_scale_keeps_local_radius() {
        let out = shapes("2 2 scale 0 0 10 0 90 arc stroke");
        assert_eq!(
            out,
            vec![r#"<g transform="scale(2 2)"><path d="M 10 0 A 10 10 0 0 1 0 10" fill="none" stroke="black" /></g>"#]
        );
    }

    #[test]
    fn test_clip_wraps_following_shapes() {
        let scene = Interpreter::new().interpret(&tokenize(
            "0 0 moveto 10 0 lineto 10 10 lineto closepath clip 0 0 moveto 5 5 lineto 5 0 lineto fill",
        ));
        assert_eq!(
            scene.definitions,
            vec![r#"<clipPath id="clip0"><path d="M 0 0 L 10 0 L 10 10 Z" /></clipPath>"#]
        );
        assert_eq!(
            scene.shapes,
            vec![r#"<g clip-path="url(#clip0)"><path d="M 0 0 L 5 5 L 5 0" fill="black" stroke="none" /></g>"#]
        );
    }

    #[test]
    fn test_clip_on_empty_path_is_noop() {
        let scene = Interpreter::new().interpret(&tokenize("clip newpath clip"));
        assert!(scene.definitions.is_empty());
    }
}
