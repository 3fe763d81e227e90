//! Ellipse shape.

use super::{ShapeOps, ShapeStyle};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned ellipse defined by the opposite corners of its bounding
/// box, in either order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub start: Point,
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    pub fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Per-axis radii. Zero when the corners coincide on an axis.
    pub fn radii(&self) -> (f64, f64) {
        (
            (self.end.x - self.start.x).abs() / 2.0,
            (self.end.y - self.start.y).abs() / 2.0,
        )
    }
}

impl ShapeOps for Ellipse {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Normalized point-in-ellipse with 10% slack. A degenerate zero-radius
    /// ellipse never hits.
    fn hit_test(&self, point: Point) -> bool {
        let center = self.center();
        let (rx, ry) = self.radii();
        if rx == 0.0 || ry == 0.0 {
            return false;
        }
        let nx = (point.x - center.x) / rx;
        let ny = (point.y - center.y) / ry;
        nx * nx + ny * ny <= 1.1
    }

    fn reference_point(&self) -> Point {
        self.start
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
