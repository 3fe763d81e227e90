//! Triangle shape.

use super::{ShapeOps, ShapeStyle};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An isosceles triangle spanned by two corner points: the apex sits at the
/// top-center of the corner box, the base runs along `end.y`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triangle {
    pub start: Point,
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Triangle {
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    /// The drawn vertices: apex, then the two base corners.
    pub fn vertices(&self) -> [Point; 3] {
        [
            Point::new((self.start.x + self.end.x) / 2.0, self.start.y),
            Point::new(self.end.x, self.end.y),
            Point::new(self.start.x, self.end.y),
        ]
    }
}

impl ShapeOps for Triangle {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Barycentric sign test against the drawn vertices. A zero-area
    /// triangle never hits.
    fn hit_test(&self, point: Point) -> bool {
        let [a, b, c] = self.vertices();
        let area = (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) / 2.0;
        if area == 0.0 {
            return false;
        }
        let s = (a.y * c.x - a.x * c.y + (c.y - a.y) * point.x + (a.x - c.x) * point.y)
            / (2.0 * area);
        let t = (a.x * b.y - a.y * b.x + (a.y - b.y) * point.x + (b.x - a.x) * point.y)
            / (2.0 * area);
        let u = 1.0 - s - t;
        s >= 0.0 && t >= 0.0 && u >= 0.0
    }

    fn reference_point(&self) -> Point {
        self.start
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(start: (f64, f64), end: (f64, f64)) -> Triangle {
        Triangle::new(
            Point::new(start.0, start.1),
            Point::new(end.0, end.1),
            ShapeStyle::default(),
        )
    }

    #[test]
    fn test_vertices() {
        let t = triangle((0.0, 0.0), (100.0, 100.0));
        let [apex, br, bl] = t.vertices();
        assert_eq!(apex, Point::new(50.0, 0.0));
        assert_eq!(br, Point::new(100.0, 100.0));
        assert_eq!(bl, Point::new(0.0, 100.0));
    }

    #[test]
    fn test_hit_interior_and_vertices() {
        let t = triangle((0.0, 0.0), (100.0, 100.0));
        assert!(t.hit_test(Point::new(50.0, 60.0)));
        assert!(t.hit_test(Point::new(50.0, 0.0)));
        assert!(t.hit_test(Point::new(0.0, 100.0)));
        // Outside the slanted edges, inside the corner box
        assert!(!t.hit_test(Point::new(5.0, 5.0)));
        assert!(!t.hit_test(Point::new(95.0, 5.0)));
    }

    #[test]
    fn test_hit_with_reversed_corners() {
        // Dragged up-left: the base sits above the apex row
        let t = triangle((100.0, 100.0), (0.0, 0.0));
        assert!(t.hit_test(Point::new(50.0, 50.0)));
        assert!(!t.hit_test(Point::new(2.0, 95.0)));
    }

    #[test]
    fn test_degenerate_never_hits() {
        let flat = triangle((0.0, 50.0), (100.0, 50.0));
        assert!(!flat.hit_test(Point::new(50.0, 50.0)));
    }
}
