//! Path construction for SVG `d` attributes.
//!
//! The builder either bakes a matrix into every incoming coordinate or
//! keeps coordinates local so that a wrapping `<g transform>` applies the
//! transform later. The interpreter flips between the two whenever the
//! transform or the clip stack changes.

use crate::utils::{Matrix, Point, num_fmt};
use smallvec::SmallVec;
use std::fmt;

/// One emitted path primitive, coordinates already in output space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(f64, f64),
    MoveToRel(f64, f64),
    LineTo(f64, f64),
    LineToRel(f64, f64),
    CurveTo(f64, f64, f64, f64, f64, f64),
    CurveToRel(f64, f64, f64, f64, f64, f64),
    /// Elliptical arc to (x, y)
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Segment::MoveTo(x, y) => write!(f, "M {} {}", num_fmt(x), num_fmt(y)),
            Segment::MoveToRel(x, y) => write!(f, "m {} {}", num_fmt(x), num_fmt(y)),
            Segment::LineTo(x, y) => write!(f, "L {} {}", num_fmt(x), num_fmt(y)),
            Segment::LineToRel(x, y) => write!(f, "l {} {}", num_fmt(x), num_fmt(y)),
            Segment::CurveTo(x1, y1, x2, y2, x, y) | Segment::CurveToRel(x1, y1, x2, y2, x, y) => {
                let cmd = if matches!(self, Segment::CurveTo(..)) {
                    'C'
                } else {
                    'c'
                };
                write!(
                    f,
                    "{cmd} {} {} {} {} {} {}",
                    num_fmt(x1),
                    num_fmt(y1),
                    num_fmt(x2),
                    num_fmt(y2),
                    num_fmt(x),
                    num_fmt(y)
                )
            }
            Segment::Arc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => write!(
                f,
                "A {} {} {} {} {} {} {}",
                num_fmt(rx),
                num_fmt(ry),
                num_fmt(rotation),
                u8::from(large_arc),
                u8::from(sweep),
                num_fmt(x),
                num_fmt(y)
            ),
            Segment::Close => f.write_str("Z"),
        }
    }
}

/// Accumulates path segments for one shape.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: SmallVec<[Segment; 8]>,
    use_local_coords: bool,
    ctm: Option<Matrix>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose between local coordinates (`use_local == true`, transform
    /// applied by a wrapping group) and baking `transform` into points.
    pub fn set_transform_mode(&mut self, use_local: bool, transform: Option<Matrix>) {
        self.use_local_coords = use_local;
        self.ctm = transform;
    }

    /// Whether coordinates are left untransformed.
    pub const fn uses_local_coords(&self) -> bool {
        self.use_local_coords
    }

    /// Map a point through the baked matrix, if any.
    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        match self.ctm {
            Some(m) if !self.use_local_coords => m.apply_point(x, y),
            _ => (x, y),
        }
    }

    /// Map a displacement through the baked matrix, ignoring translation.
    fn transform_vector(&self, dx: f64, dy: f64) -> Point {
        match self.ctm {
            Some(m) if !self.use_local_coords => (m.a * dx + m.c * dy, m.b * dx + m.d * dy),
            _ => (dx, dy),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.transform_point(x, y);
        self.segments.push(Segment::MoveTo(x, y));
    }

    pub fn move_to_rel(&mut self, dx: f64, dy: f64) {
        let (dx, dy) = self.transform_vector(dx, dy);
        self.segments.push(Segment::MoveToRel(dx, dy));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.transform_point(x, y);
        self.segments.push(Segment::LineTo(x, y));
    }

    pub fn line_to_rel(&mut self, dx: f64, dy: f64) {
        let (dx, dy) = self.transform_vector(dx, dy);
        self.segments.push(Segment::LineToRel(dx, dy));
    }

    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        let (x1, y1) = self.transform_point(x1, y1);
        let (x2, y2) = self.transform_point(x2, y2);
        let (x, y) = self.transform_point(x, y);
        self.segments.push(Segment::CurveTo(x1, y1, x2, y2, x, y));
    }

    pub fn curve_to_rel(&mut self, dx1: f64, dy1: f64, dx2: f64, dy2: f64, dx: f64, dy: f64) {
        let (dx1, dy1) = self.transform_vector(dx1, dy1);
        let (dx2, dy2) = self.transform_vector(dx2, dy2);
        let (dx, dy) = self.transform_vector(dx, dy);
        self.segments
            .push(Segment::CurveToRel(dx1, dy1, dx2, dy2, dx, dy));
    }

    /// Elliptical arc to (x, y). Radii are taken as given.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse_to(
        &mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) {
        let (x, y) = self.transform_point(x, y);
        self.segments.push(Segment::Arc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            x,
            y,
        });
    }

    pub fn close(&mut self) {
        self.segments.push(Segment::Close);
    }

    /// Rendered `d` attribute.
    pub fn to_path(&self) -> String {
        self.segments
            .iter()
            .map(Segment::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn pop_last(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Exactly one absolute move followed by one absolute line.
    pub fn is_simple_line(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [Segment::MoveTo(..), Segment::LineTo(..)]
        )
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Close))
    }

    /// Fresh, empty builder that keeps the current transform policy.
    pub fn reset(&self) -> Self {
        Self {
            segments: SmallVec::new(),
            use_local_coords: self.use_local_coords,
            ctm: self.ctm,
        }
    }
}
