//! PostScript operator implementations.
//!
//! Operators are grouped by category:
//! - `stack` - Arithmetic, stack and dictionaries (neg, add, sub, mul, div, exch, dup, dict, begin, end, def)
//! - `graphics_state` - State stack, transforms and stroke style (gsave, grestore, restore, translate, scale, rotate, setlinewidth, setlinecap, setlinejoin, setdash)
//! - `color` - Solid colors and pattern paint (setrgbcolor, setgray, setcmykcolor, setpattern)
//! - `path` - Path construction, painting and clipping (newpath, moveto, rmoveto, lineto, rlineto, curveto, rcurveto, closepath, arc, stroke, fill, eofill, evenodd, clip)
//! - `text` - Fonts and text placement (findfont, scalefont, setfont, show)
//! - `shading` - Gradients and tiling patterns (shfill, makepattern)
//! - `image` - Raster placeholders (image, imagemask)

mod color;
mod graphics_state;
mod image;
mod path;
mod shading;
mod stack;
mod text;

/// Built-in operator names. Unknown names resolve to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Arithmetic and stack
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Exch,
    Dup,

    // Dictionaries
    Dict,
    Begin,
    End,
    Def,

    // Graphics state
    GSave,
    GRestore,
    Translate,
    Scale,
    Rotate,
    SetLineWidth,
    SetLineCap,
    SetLineJoin,
    SetDash,

    // Color
    SetRgbColor,
    SetGray,
    SetCmykColor,
    SetColorSpace,
    SetPattern,

    // Path construction
    NewPath,
    MoveTo,
    RMoveTo,
    LineTo,
    RLineTo,
    CurveTo,
    RCurveTo,
    ClosePath,
    Arc,

    // Painting
    Stroke,
    Fill,
    Clip,
    ShFill,
    MakePattern,
    Image,

    // Text
    FindFont,
    ScaleFont,
    SetFont,
    Show,

    // Accepted and ignored
    ShowPage,
    Matrix,
}

impl Operator {
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "neg" => Operator::Neg,
            "add" => Operator::Add,
            "sub" => Operator::Sub,
            "mul" => Operator::Mul,
            "div" => Operator::Div,
            "exch" => Operator::Exch,
            "dup" => Operator::Dup,

            "dict" => Operator::Dict,
            "begin" => Operator::Begin,
            "end" => Operator::End,
            "def" => Operator::Def,

            "gsave" => Operator::GSave,
            "grestore" | "restore" => Operator::GRestore,
            "translate" => Operator::Translate,
            "scale" => Operator::Scale,
            "rotate" => Operator::Rotate,
            "setlinewidth" => Operator::SetLineWidth,
            "setlinecap" => Operator::SetLineCap,
            "setlinejoin" => Operator::SetLineJoin,
            "setdash" => Operator::SetDash,

            "setrgbcolor" => Operator::SetRgbColor,
            "setgray" => Operator::SetGray,
            "setcmykcolor" => Operator::SetCmykColor,
            "setcolorspace" => Operator::SetColorSpace,
            "setpattern" => Operator::SetPattern,

            "newpath" => Operator::NewPath,
            "moveto" => Operator::MoveTo,
            "rmoveto" => Operator::RMoveTo,
            "lineto" => Operator::LineTo,
            "rlineto" => Operator::RLineTo,
            "curveto" => Operator::CurveTo,
            "rcurveto" => Operator::RCurveTo,
            "closepath" => Operator::ClosePath,
            "arc" => Operator::Arc,

            "stroke" => Operator::Stroke,
            "fill" | "eofill" | "evenodd" => Operator::Fill,
            "clip" => Operator::Clip,
            "shfill" => Operator::ShFill,
            "makepattern" => Operator::MakePattern,
            "image" | "imagemask" => Operator::Image,

            "findfont" => Operator::FindFont,
            "scalefont" => Operator::ScaleFont,
            "setfont" => Operator::SetFont,
            "show" => Operator::Show,

            "showpage" => Operator::ShowPage,
            "matrix" => Operator::Matrix,
            _ => return None,
        };
        Some(op)
    }

    /// Operators that change how a pending line would be painted.
    pub const fn is_state_modifier(self) -> bool {
        matches!(
            self,
            Operator::SetRgbColor
                | Operator::SetGray
                | Operator::SetCmykColor
                | Operator::SetLineWidth
                | Operator::SetLineCap
                | Operator::SetLineJoin
                | Operator::SetDash
                | Operator::Translate
                | Operator::Scale
                | Operator::Rotate
        )
    }

    /// Operators that extend the current subpath.
    pub const fn is_path_continuator(self) -> bool {
        matches!(
            self,
            Operator::LineTo | Operator::CurveTo | Operator::RLineTo | Operator::RCurveTo
        )
    }
}
