//! Graphics state carried through `gsave`/`grestore`.

use super::objects::Dict;
use crate::utils::{MATRIX_IDENTITY, Matrix, Point};

pub const DEFAULT_FILL: &str = "black";
pub const DEFAULT_FONT: &str = "Arial, sans-serif";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_LINE_CAP: &str = "butt";
pub const DEFAULT_LINE_JOIN: &str = "miter";

/// Which parts of a shape get painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintMode {
    pub stroke: bool,
    pub fill: bool,
}

impl PaintMode {
    pub const FILL_ONLY: Self = Self {
        stroke: false,
        fill: true,
    };
    pub const STROKE_ONLY: Self = Self {
        stroke: true,
        fill: false,
    };
}

/// One entry of the clip stack: rendered path data plus the id of the
/// `clipPath` definition that shapes reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipLayer {
    pub id: String,
    pub path: String,
}

/// SVG `stroke-linecap` for a PostScript cap code.
pub fn line_cap_name(code: f64) -> &'static str {
    if code == 0.0 {
        "butt"
    } else if code == 1.0 {
        "round"
    } else {
        "square"
    }
}

/// SVG `stroke-linejoin` for a PostScript join code. Unknown codes fall
/// back to miter.
pub fn line_join_name(code: f64) -> &'static str {
    if code == 1.0 {
        "round"
    } else if code == 2.0 {
        "bevel"
    } else if code == 3.0 {
        "arcs"
    } else {
        "miter"
    }
}

/// The current drawing context.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    /// Current transformation matrix
    pub ctm: Matrix,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub line_cap: String,
    pub line_join: String,
    pub font: String,
    pub font_size: f64,
    /// Append-only; innermost layer last
    pub clip_stack: Vec<ClipLayer>,
    /// Space-joined dash lengths
    pub dash: Option<String>,
    /// Where the next `show` places its text (untransformed)
    pub last_text_position: Option<Point>,
    pub pattern_id: Option<String>,
    pub pattern_dict: Option<Dict>,
}

impl GraphicsState {
    /// Identity transform, black fill, no stroke.
    pub fn new() -> Self {
        Self {
            ctm: MATRIX_IDENTITY,
            fill: Some(DEFAULT_FILL.to_string()),
            stroke: None,
            stroke_width: 1.0,
            line_cap: DEFAULT_LINE_CAP.to_string(),
            line_join: DEFAULT_LINE_JOIN.to_string(),
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            clip_stack: Vec::new(),
            dash: None,
            last_text_position: None,
            pattern_id: None,
            pattern_dict: None,
        }
    }

    /// Whether shapes must be wrapped in a `<g>` carrying the transform and
    /// clip instead of having coordinates baked in.
    pub fn needs_group(&self) -> bool {
        !self.ctm.is_identity() || !self.clip_stack.is_empty()
    }

    /// Set fill and stroke to a solid color, dropping any pattern.
    pub fn set_solid_color(&mut self, color: String) {
        self.fill = Some(color.clone());
        self.stroke = Some(color);
        self.pattern_id = None;
        self.pattern_dict = None;
    }

    /// Innermost clip layer, if any.
    pub fn current_clip(&self) -> Option<&ClipLayer> {
        self.clip_stack.last()
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_and_join_codes() {
        assert_eq!(line_cap_name(0.0), "butt");
        assert_eq!(line_cap_name(1.0), "round");
        assert_eq!(line_cap_name(2.0), "square");
        assert_eq!(line_join_name(0.0), "miter");
        assert_eq!(line_join_name(2.0), "bevel");
        assert_eq!(line_join_name(3.0), "arcs");
        assert_eq!(line_join_name(7.0), "miter");
    }

    #[test]
    fn test_default_state_needs_no_group() {
        let state = GraphicsState::new();
        assert!(!state.needs_group());
        assert_eq!(state.fill.as_deref(), Some("black"));
        assert!(state.stroke.is_none());
    }
}
