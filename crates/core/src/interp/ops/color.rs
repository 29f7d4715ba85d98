//! Color operators.
//!
//! Handles: setrgbcolor, setgray, setcmykcolor, setpattern

use crate::interp::interpreter::Interpreter;
use crate::model::StackValue;
use crate::model::color::{cmyk_to_color, gray_to_color, rgb_to_color};

impl Interpreter {
    /// PostScript operator: `setrgbcolor`
    pub fn do_setrgbcolor(&mut self, r: f64, g: f64, b: f64) {
        self.gstate.set_solid_color(rgb_to_color(r, g, b));
    }

    /// PostScript operator: `setgray`
    pub fn do_setgray(&mut self, gray: f64) {
        self.gstate.set_solid_color(gray_to_color(gray));
    }

    /// PostScript operator: `setcmykcolor`
    pub fn do_setcmykcolor(&mut self, c: f64, m: f64, y: f64, k: f64) {
        self.gstate.set_solid_color(cmyk_to_color(c, m, y, k));
    }

    /// Fills with a tile made by `makepattern`. Anything that is not a
    /// pattern disables fill.
    ///
    /// PostScript operator: `setpattern`
    pub fn do_setpattern(&mut self, pattern: Option<StackValue>) {
        match pattern {
            Some(StackValue::Pattern(pattern)) => {
                self.gstate.fill = Some(format!("url(#{})", pattern.id));
                self.gstate.pattern_id = Some(pattern.id);
                self.gstate.pattern_dict = Some(pattern.dict);
            }
            _ => {
                self.gstate.fill = Some("none".to_string());
                self.gstate.pattern_id = None;
                self.gstate.pattern_dict = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interp::interpreter::Interpreter;
    use crate::parser::tokenize;

    fn fill_after(source: &str) -> Option<String> {
        let mut interp = Interpreter::new();
        interp.run(&tokenize(source));
        interp.graphics_state().fill.clone()
    }

    #[test]
    fn test_solid_colors_set_fill_and_stroke() {
        let mut interp = Interpreter::new();
        interp.run(&tokenize("0 1 0 setrgbcolor"));
        let state = interp.graphics_state();
        assert_eq!(state.fill.as_deref(), Some("rgb(0, 255, 0)"));
        assert_eq!(state.stroke, state.fill);
    }

    #[test]
    fn test_cmyk_and_gray() {
        assert_eq!(fill_after("0 0 0 1 setcmykcolor").as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(fill_after("1 setgray").as_deref(), Some("rgb(255, 255, 255)"));
    }

    #[test]
    fn test_setpattern_with_pattern() {
        let source = "<< /PaintProc { 0 0 moveto 5 5 lineto stroke } >> matrix makepattern setpattern";
        let mut interp = Interpreter::new();
        interp.run(&tokenize(source));
        let state = interp.graphics_state();
        assert_eq!(state.fill.as_deref(), Some("url(#pattern0)"));
        assert_eq!(state.pattern_id.as_deref(), Some("pattern0"));
    }

    #[test]
    fn test_setpattern_without_pattern() {
        assert_eq!(fill_after("42 setpattern").as_deref(), Some("none"));
    }
}
