//! Image operators.
//!
//! Handles: image, imagemask
//!
//! Sample data is never decoded. Each image becomes a fixed placeholder
//! bitmap so the document still shows where an image was.

use tracing::warn;

use crate::interp::interpreter::Interpreter;

/// Embedded SVG reading "Image Not Found".
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSI1MTIiIGhlaWdodD0iNTEyIj4KICA8dGV4dCB4PSIyNCIgeT0iMTk4IiBmaWxsPSJ3aGl0ZSIgZm9udC1zaXplPSIxMjgiPkltYWdlbTwvdGV4dD4KICA8dGV4dCB4PSIyNCIgeT0iMjk4IiBmaWxsPSJ3aGl0ZSIgZm9udC1zaXplPSIxMjgiPk5vdDwvdGV4dD4KICA8dGV4dCB4PSIyNCIgeT0iMzk4IiBmaWxsPSJ3aGl0ZSIgZm9udC1zaXplPSIxMjgiPkZvdW5kPC90ZXh0Pgo8L3N2Zz4K";

impl Interpreter {
    /// Emits the placeholder image. Operands are left on the stack.
    ///
    /// PostScript operators: `image`, `imagemask`
    pub fn do_image(&mut self) {
        warn!("image data is not decoded; emitting placeholder");
        self.scene.add_comment("image/imagemask not implemented");
        self.scene.add_shape(format!(
            "<image transform=\"scale(1 -1)\" x=\"10\" y=\"-320\" width=\"50\" height=\"50\" href=\"{PLACEHOLDER_IMAGE}\" />"
        ));
    }
}
