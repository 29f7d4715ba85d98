//! Output sink for interpretation.
//!
//! The interpreter never writes a document directly. It appends SVG
//! fragments to a `Scene`, which the converter later assembles.

use crate::model::{GraphicsState, PaintMode};
use crate::utils::{Matrix, TRANSFORM_EPSILON, num_fmt};
use serde::Serialize;

/// Fragments accumulated while interpreting a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scene {
    /// `<defs>` children: clip paths, gradients, patterns
    pub definitions: Vec<String>,
    /// Painted shapes and diagnostic comments
    pub shapes: Vec<String>,
    /// Text elements, rendered after every shape
    pub texts: Vec<String>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.shapes.is_empty() && self.texts.is_empty()
    }

    pub fn add_definition(&mut self, fragment: String) {
        self.definitions.push(fragment);
    }

    pub fn add_shape(&mut self, fragment: String) {
        self.shapes.push(fragment);
    }

    pub fn add_text(&mut self, fragment: String) {
        self.texts.push(fragment);
    }

    /// Append an XML comment to the shape list.
    pub fn add_comment(&mut self, message: &str) {
        // "--" is not allowed inside XML comments
        let message = message.replace("--", "- -");
        self.shapes.push(format!("<!-- {message} -->"));
    }

    /// Paint path data `d` with the given state.
    ///
    /// `fill_ref` names a definition (gradient or pattern) to use as the
    /// fill paint instead of the state's fill color.
    pub fn paint_path(
        &mut self,
        d: &str,
        state: &GraphicsState,
        mode: PaintMode,
        fill_ref: Option<&str>,
    ) {
        self.shapes
            .push(render_path_element(d, state, mode, fill_ref));
    }
}

/// SVG `transform` attribute value for a matrix.
///
/// Only components that deviate from identity are emitted, in the order
/// translate, rotate, scale. Skew is not represented.
pub fn transform_attribute(ctm: &Matrix) -> String {
    let parts = ctm.decompose();
    let mut out = Vec::new();
    let (tx, ty) = parts.translate;
    if tx.abs() > TRANSFORM_EPSILON || ty.abs() > TRANSFORM_EPSILON {
        out.push(format!("translate({} {})", num_fmt(tx), num_fmt(ty)));
    }
    if parts.rotate.abs() > TRANSFORM_EPSILON {
        out.push(format!("rotate({})", num_fmt(parts.rotate)));
    }
    let (sx, sy) = parts.scale;
    if (sx - 1.0).abs() > TRANSFORM_EPSILON || (sy - 1.0).abs() > TRANSFORM_EPSILON {
        out.push(format!("scale({} {})", num_fmt(sx), num_fmt(sy)));
    }
    out.join(" ")
}

/// Render one `<path>` element, wrapped in a group when the state carries
/// a non-identity transform or an active clip.
pub fn render_path_element(
    d: &str,
    state: &GraphicsState,
    mode: PaintMode,
    fill_ref: Option<&str>,
) -> String {
    let fill_color = if mode.fill {
        state.fill.as_deref().unwrap_or("black")
    } else {
        "none"
    };
    let stroke_color = if mode.stroke {
        state.stroke.as_deref().unwrap_or("black")
    } else {
        "none"
    };

    let mut attrs = vec![format!("d=\"{d}\"")];
    match fill_ref {
        Some(id) => attrs.push(format!("fill=\"url(#{id})\"")),
        None => attrs.push(format!("fill=\"{fill_color}\"")),
    }

    if mode.stroke && stroke_color != "none" {
        attrs.push(format!("stroke=\"{stroke_color}\""));
        if state.stroke_width != 1.0 {
            attrs.push(format!("stroke-width=\"{}\"", num_fmt(state.stroke_width)));
        }
        if state.line_cap != "butt" {
            attrs.push(format!("stroke-linecap=\"{}\"", state.line_cap));
        }
        if state.line_join != "miter" {
            attrs.push(format!("stroke-linejoin=\"{}\"", state.line_join));
        }
        if let Some(dash) = state.dash.as_deref().filter(|dash| !dash.is_empty()) {
            attrs.push(format!("stroke-dasharray=\"{dash}\""));
        }
    } else if fill_color != "none" {
        attrs.push("stroke=\"none\"".to_string());
    }

    let clip = state
        .current_clip()
        .map(|layer| format!(" clip-path=\"url(#{})\"", layer.id))
        .unwrap_or_default();
    let attrs = attrs.join(" ");

    if state.needs_group() {
        let transform = transform_attribute(&state.ctm);
        if transform.is_empty() {
            format!("<g{clip}><path {attrs} /></g>")
        } else {
            format!("<g transform=\"{transform}\"{clip}><path {attrs} /></g>")
        }
    } else {
        format!("<path {attrs}{clip} />")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClipLayer;
    use crate::utils::MATRIX_IDENTITY;

    #[test]
    fn test_fill_only_path() {
        let state = GraphicsState::new();
        let svg = render_path_element("M 0 0 Z", &state, PaintMode::FILL_ONLY, None);
        assert_eq!(svg, r#"<path d="M 0 0 Z" fill="black" stroke="none" />"#);
    }

    #[test]
    fn test_stroke_attributes() {
        let mut state = GraphicsState::new();
        state.stroke_width = 2.5;
        state.line_cap = "round".to_string();
        state.dash = Some("3 1".to_string());
        let svg = render_path_element("M 0 0 L 1 1", &state, PaintMode::STROKE_ONLY, None);
        assert_eq!(
            svg,
            r#"<path d="M 0 0 L 1 1" fill="none" stroke="black" stroke-width="2.5" stroke-linecap="round" stroke-dasharray="3 1" />"#
        );
    }

    #[test]
    fn test_group_with_transform_and_clip() {
        let mut state = GraphicsState::new();
        state.ctm = MATRIX_IDENTITY.translate(10.0, 20.0);
        state.clip_stack.push(ClipLayer {
            id: "clip0".to_string(),
            path: "M 0 0 Z".to_string(),
        });
        let svg = render_path_element("M 0 0 Z", &state, PaintMode::FILL_ONLY, Some("grad1"));
        assert_eq!(
            svg,
            r#"<g transform="translate(10 20)" clip-path="url(#clip0)"><path d="M 0 0 Z" fill="url(#grad1)" stroke="none" /></g>"#
        );
    }

    #[test]
    fn test_transform_attribute_order() {
        let m = MATRIX_IDENTITY.translate(5.0, 0.0).scale(2.0, 3.0);
        assert_eq!(transform_attribute(&m), "translate(5 0) scale(2 3)");
        assert_eq!(transform_attribute(&MATRIX_IDENTITY), "");
    }

    #[test]
    fn test_comment_sanitized() {
        let mut scene = Scene::new();
        scene.add_comment("Unhandled operator: a--b");
        assert_eq!(scene.shapes, vec!["<!-- Unhandled operator: a- -b -->"]);
    }
}
