//! Cubic Bezier curves and the four-edge boundary of a deformed note.
//!
//! A curve is evaluated per axis with the standard Bernstein form
//! `B(t) = (1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`.

#[cfg(test)]
#[path = "bezier_test.rs"]
mod bezier_test;

use crate::camera::Point;

/// A cubic Bezier curve given by its start point, two control points and end point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CubicBezier {
    pub points: [Point; 4],
}

impl CubicBezier {
    #[must_use]
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { points: [p0, p1, p2, p3] }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.points[3]
    }

    /// Evaluate the curve at parameter `t`. Values outside `[0, 1]` extrapolate.
    #[must_use]
    pub fn at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let w0 = u * u * u;
        let w1 = 3.0 * u * u * t;
        let w2 = 3.0 * u * t * t;
        let w3 = t * t * t;
        let [p0, p1, p2, p3] = self.points;
        Point {
            x: w0 * p0.x + w1 * p1.x + w2 * p2.x + w3 * p3.x,
            y: w0 * p0.y + w1 * p1.y + w2 * p2.y + w3 * p3.y,
        }
    }

    /// The same curve traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let [p0, p1, p2, p3] = self.points;
        Self::new(p3, p2, p1, p0)
    }

    /// Blend control points pairwise towards `other` by `ratio`.
    #[must_use]
    pub fn lerp(&self, other: &CubicBezier, ratio: f64) -> Self {
        let mut points = self.points;
        for (p, q) in points.iter_mut().zip(other.points) {
            *p = p.lerp(q, ratio);
        }
        Self { points }
    }
}

/// Boundary of a note: one curve per edge, traversed clockwise.
///
/// `top` runs left to right, `right` top to bottom, `bottom` right to left
/// and `left` bottom to top, so each curve starts where the previous one ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeCurves {
    pub top: CubicBezier,
    pub right: CubicBezier,
    pub bottom: CubicBezier,
    pub left: CubicBezier,
}

impl EdgeCurves {
    /// Horizontal curve at `ratio` of the way from the top edge to the bottom edge.
    ///
    /// The bottom edge runs right to left, so it is reversed before blending.
    #[must_use]
    pub fn scan_curve(&self, ratio: f64) -> CubicBezier {
        self.top.lerp(&self.bottom.reversed(), ratio)
    }
}
