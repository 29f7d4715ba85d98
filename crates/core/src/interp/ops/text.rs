//! Font and text operators.
//!
//! Handles: findfont, scalefont, setfont, show
//!
//! Fonts are plain dictionaries carrying `FontName` and `FontSize`; no
//! glyph metrics are loaded.

use crate::interp::interpreter::Interpreter;
use crate::model::StackValue;
use crate::model::objects::{dict_get, new_dict};
use crate::utils::{enc, num_fmt};

const FONT_NAME: &str = "FontName";
const FONT_SIZE: &str = "FontSize";

impl Interpreter {
    /// Pushes a font dictionary for `name`.
    ///
    /// PostScript operator: `findfont`
    pub fn do_findfont(&mut self, name: Option<&StackValue>) {
        let font = new_dict();
        let name = name.map(StackValue::to_display_string).unwrap_or_default();
        font.borrow_mut()
            .insert(FONT_NAME.to_string(), StackValue::Text(name));
        self.stack.push(StackValue::Dict(font));
    }

    /// Pushes a copy of `font` with its size set to `size`. A bare name is
    /// promoted to a font dictionary first.
    ///
    /// PostScript operator: `scalefont`
    pub fn do_scalefont(&mut self, font: Option<StackValue>, size: f64) {
        let scaled = new_dict();
        match font {
            Some(StackValue::Dict(source)) => {
                scaled.borrow_mut().extend(
                    source
                        .borrow()
                        .iter()
                        .map(|(key, value)| (key.clone(), value.clone())),
                );
            }
            other => {
                let name = other
                    .as_ref()
                    .map(StackValue::to_display_string)
                    .unwrap_or_default();
                scaled
                    .borrow_mut()
                    .insert(FONT_NAME.to_string(), StackValue::Text(name));
            }
        }
        scaled
            .borrow_mut()
            .insert(FONT_SIZE.to_string(), StackValue::Number(size));
        self.stack.push(StackValue::Dict(scaled));
    }

    /// Makes `font` current. A font dictionary updates family and size;
    /// a bare name updates the family only.
    ///
    /// PostScript operator: `setfont`
    pub fn do_setfont(&mut self, font: &StackValue) {
        match font {
            StackValue::Dict(dict) => {
                if let Some(name) = dict_get(dict, FONT_NAME) {
                    self.gstate.font = name.to_display_string();
                }
                if let Some(size) = dict_get(dict, FONT_SIZE).and_then(|v| v.as_number()) {
                    self.gstate.font_size = size;
                }
            }
            StackValue::Text(name) | StackValue::Name(name) => {
                self.gstate.font = name.clone();
            }
            _ => {}
        }
    }

    /// Emits `text` at the last `moveto` position. Without a position
    /// nothing is drawn. Either way the path and the position are cleared.
    ///
    /// PostScript operator: `show`
    pub fn do_show(&mut self, text: &str) {
        if let Some((x, y)) = self.gstate.last_text_position {
            let (x, y) = self.gstate.ctm.apply_point(x, y);
            let fill = self.gstate.fill.as_deref().unwrap_or("black");
            self.scene.add_text(format!(
                "<text transform=\"scale(1 -1)\" x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" stroke=\"none\">{}</text>",
                num_fmt(x),
                num_fmt(-y),
                enc(&self.gstate.font),
                num_fmt(self.gstate.font_size),
                fill,
                enc(text)
            ));
        }
        self.path = self.path.reset();
        self.gstate.last_text_position = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::interp::interpreter::Interpreter;
    use crate::parser::tokenize;

    #[test]
    fn test_font_selection() {
        let mut interp = Interpreter::new();
        interp.run(&tokenize("/Helvetica findfont 24 scalefont setfont"));
        let state = interp.graphics_state();
        assert_eq!(state.font, "Helvetica");
        assert_eq!(state.font_size, 24.0);
        assert!(interp.operand_stack().is_empty());
    }

    #[test]
    fn test_setfont_with_name_keeps_size() {
        let mut interp = Interpreter::new();
        interp.run(&tokenize("/Courier setfont"));
        let state = interp.graphics_state();
        assert_eq!(state.font, "Courier");
        assert_eq!(state.font_size, 12.0);
    }

    #[test]
    fn test_show_places_escaped_text() {
        let scene = Interpreter::new().interpret(&tokenize(
            "/Times findfont 10 scalefont setfont 20 30 moveto (a<b & c) show",
        ));
        assert!(scene.shapes.is_empty());
        assert_eq!(
            scene.texts,
            vec![r#"<text transform="scale(1 -1)" x="20" y="-30" font-family="Times" font-size="10" fill="black" stroke="none">a&lt;b &amp; c</text>"#]
        );
    }

    #[test]
    fn test_show_without_position_draws_nothing() {
        let scene = Interpreter::new().interpret(&tokenize("(hello) show"));
        assert!(scene.texts.is_empty());
    }

    #[test]
    fn test_show_uses_transform() {
        let scene =
            Interpreter::new().interpret(&tokenize("100 200 translate 5 5 moveto (x) show"));
        assert!(scene.texts[0].contains(r#"x="105" y="-205""#));
    }
}
