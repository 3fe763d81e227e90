//! Line shape.

use super::{point_to_segment_dist, ShapeOps, ShapeStyle};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum pick distance for thin lines.
const HIT_TOLERANCE: f64 = 4.0;

/// A straight line segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

impl ShapeOps for Line {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Point-to-segment distance, within the stroke width (at least
    /// [`HIT_TOLERANCE`] so hairlines stay selectable).
    fn hit_test(&self, point: Point) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= self.style.width.max(HIT_TOLERANCE)
    }

    fn reference_point(&self) -> Point {
        self.start
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
