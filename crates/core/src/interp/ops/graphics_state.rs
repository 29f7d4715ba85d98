//! Graphics state operators.
//!
//! Handles: gsave, grestore, restore, translate, scale, rotate,
//! setlinewidth, setlinecap, setlinejoin, setdash
//!
//! - gsave/grestore: Push/pop a full copy of the graphics state
//! - translate, scale, rotate: Concatenate onto the current transform
//! - setlinewidth, setlinecap, setlinejoin, setdash: Stroke styling

use tracing::debug;

use crate::interp::interpreter::Interpreter;
use crate::model::StackValue;
use crate::model::state::{line_cap_name, line_join_name};
use crate::utils::num_fmt;

/// `<clipPath>` definition for already rendered path data.
pub(crate) fn clip_path_definition(id: &str, d: &str) -> String {
    format!("<clipPath id=\"{id}\"><path d=\"{d}\" /></clipPath>")
}

impl Interpreter {
    /// Saves a copy of the current graphics state.
    ///
    /// PostScript operator: `gsave`
    pub fn do_gsave(&mut self) {
        self.gstack.push(self.gstate.clone());
    }

    /// Restores the most recently saved graphics state.
    ///
    /// Clip layers present in the saved state beyond the current clip depth
    /// get their `clipPath` definitions emitted here, under fresh ids.
    ///
    /// PostScript operators: `grestore`, `restore`
    pub fn do_grestore(&mut self) {
        let Some(mut saved) = self.gstack.pop() else {
            return;
        };
        let current_depth = self.gstate.clip_stack.len();
        if saved.clip_stack.len() > current_depth {
            for index in current_depth..saved.clip_stack.len() {
                let id = self.fresh_id("clip");
                let layer = &mut saved.clip_stack[index];
                debug!(id = %id, "materializing clip layer on restore");
                self.scene
                    .add_definition(clip_path_definition(&id, &layer.path));
                layer.id = id;
            }
        }
        self.gstate = saved;
        self.update_path_transform();
    }

    /// PostScript operator: `translate`
    pub fn do_translate(&mut self, tx: f64, ty: f64) {
        self.gstate.ctm = self.gstate.ctm.translate(tx, ty);
        self.update_path_transform();
    }

    /// PostScript operator: `scale`
    pub fn do_scale(&mut self, sx: f64, sy: f64) {
        self.gstate.ctm = self.gstate.ctm.scale(sx, sy);
        self.update_path_transform();
    }

    /// Rotates by `angle` degrees.
    ///
    /// PostScript operator: `rotate`
    pub fn do_rotate(&mut self, angle: f64) {
        self.gstate.ctm = self.gstate.ctm.rotate(angle);
        self.update_path_transform();
    }

    /// PostScript operator: `setlinewidth`
    pub fn do_setlinewidth(&mut self, width: f64) {
        self.gstate.stroke_width = width;
    }

    /// Numeric codes map to SVG cap names; text passes through verbatim.
    ///
    /// PostScript operator: `setlinecap`
    pub fn do_setlinecap(&mut self, cap: &StackValue) {
        match cap {
            StackValue::Number(code) => self.gstate.line_cap = line_cap_name(*code).to_string(),
            StackValue::Text(name) | StackValue::Name(name) => {
                self.gstate.line_cap = name.clone();
            }
            _ => {}
        }
    }

    /// Numeric codes map to SVG join names; text passes through verbatim.
    ///
    /// PostScript operator: `setlinejoin`
    pub fn do_setlinejoin(&mut self, join: &StackValue) {
        match join {
            StackValue::Number(code) => self.gstate.line_join = line_join_name(*code).to_string(),
            StackValue::Text(name) | StackValue::Name(name) => {
                self.gstate.line_join = name.clone();
            }
            _ => {}
        }
    }

    /// Sets the dash pattern from an array or a single number. The offset
    /// is not representable and is dropped.
    ///
    /// PostScript operator: `setdash`
    pub fn do_setdash(&mut self, pattern: Option<&StackValue>, _offset: f64) {
        self.gstate.dash = match pattern {
            Some(StackValue::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| num_fmt(item.as_number().unwrap_or(0.0)))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Some(StackValue::Number(n)) => Some(num_fmt(*n)),
            _ => None,
        };
    }
}
