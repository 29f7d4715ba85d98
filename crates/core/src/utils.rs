//! Miscellaneous routines shared by the interpreter and the converter.
//!
//! Provides:
//! - The affine `Matrix` and its decomposition
//! - The number formatting policy used for every emitted coordinate
//! - XML escaping for text content

use serde::Serialize;
use std::borrow::Cow;

/// Epsilon used when deciding whether a transform component deviates from
/// identity.
pub const TRANSFORM_EPSILON: f64 = 1e-6;

/// Determinants smaller than this are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A 6-element affine transformation matrix `[a b c d e f]`.
///
/// Transforms point (x, y) to (ax + cy + e, bx + dy + f).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

/// Identity transformation matrix.
pub const MATRIX_IDENTITY: Matrix = Matrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

/// Best-effort split of a matrix into translate, rotate, scale and skew.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decomposition {
    pub translate: Point,
    pub scale: Point,
    /// Rotation in degrees.
    pub rotate: f64,
    /// Skew angles in degrees; approximate, never used to rebuild a matrix.
    pub skew: Point,
}

/// Multiplies two matrices: result = m1 * m0.
/// This applies m1 first, then m0.
pub fn mult_matrix(m1: Matrix, m0: Matrix) -> Matrix {
    Matrix::new(
        m0.a * m1.a + m0.c * m1.b,
        m0.b * m1.a + m0.d * m1.b,
        m0.a * m1.c + m0.c * m1.d,
        m0.b * m1.c + m0.d * m1.d,
        m0.a * m1.e + m0.c * m1.f + m0.e,
        m0.b * m1.e + m0.d * m1.f + m0.f,
    )
}

impl Matrix {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Compose so that `other` is applied before `self`.
    ///
    /// This is the order in which `translate`, `scale` and `rotate`
    /// operators concatenate onto the current transform.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        mult_matrix(*other, *self)
    }

    pub fn translate(&self, tx: f64, ty: f64) -> Matrix {
        self.multiply(&Matrix::new(1.0, 0.0, 0.0, 1.0, tx, ty))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Matrix {
        self.multiply(&Matrix::new(sx, 0.0, 0.0, sy, 0.0, 0.0))
    }

    /// Rotate by `degrees` counter-clockwise.
    pub fn rotate(&self, degrees: f64) -> Matrix {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.multiply(&Matrix::new(cos, sin, -sin, cos, 0.0, 0.0))
    }

    /// Applies the matrix to a point.
    pub fn apply_point(&self, x: f64, y: f64) -> Point {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Inverse matrix, or identity when the matrix is singular.
    pub fn invert(&self) -> Matrix {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < SINGULAR_EPSILON {
            return MATRIX_IDENTITY;
        }
        Matrix::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
            (self.c * self.f - self.d * self.e) / det,
            (self.b * self.e - self.a * self.f) / det,
        )
    }

    /// Length of the transformed unit vectors along x and y.
    pub fn axis_scales(&self) -> Point {
        (self.a.hypot(self.b), self.c.hypot(self.d))
    }

    pub fn decompose(&self) -> Decomposition {
        let scale_x = self.a.hypot(self.b);
        let det = self.a * self.d - self.b * self.c;
        let scale_y = if scale_x == 0.0 { 0.0 } else { det / scale_x };

        let rotate = self.b.atan2(self.a).to_degrees();
        let skew_x = (self.a * self.c + self.b * self.d).atan2(scale_x * scale_x);
        let skew_y = (self.a * self.b + self.c * self.d).atan2(scale_y * scale_y);

        Decomposition {
            translate: (self.e, self.f),
            scale: (scale_x, scale_y),
            rotate,
            skew: (skew_x.to_degrees(), skew_y.to_degrees()),
        }
    }

    /// Exact equality with the identity coefficients.
    pub fn is_identity(&self) -> bool {
        *self == MATRIX_IDENTITY
    }
}

impl Default for Matrix {
    fn default() -> Self {
        MATRIX_IDENTITY
    }
}

/// Formats a number for output.
///
/// Integral values print without a decimal point; anything else prints with
/// three decimals and trailing zeros trimmed.
pub fn num_fmt(n: f64) -> String {
    if !n.is_finite() || n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 {
        return format!("{n:.0}");
    }
    let fixed = format!("{n:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Encodes a string for XML text and attribute content.
///
/// Returns `Cow::Borrowed` if no escaping is needed.
pub fn enc(x: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(x)
}
