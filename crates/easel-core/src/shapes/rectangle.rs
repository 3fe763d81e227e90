//! Rectangle shape.

use super::{ShapeOps, ShapeStyle};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle defined by two opposite corners, in either
/// order; negative extents are permitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub start: Point,
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    /// The normalized corner box.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}

impl ShapeOps for Rectangle {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    /// Containment against the min/max corner box, edges included.
    fn hit_test(&self, point: Point) -> bool {
        let rect = self.as_rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
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

    #[test]
    fn test_hit_inside_and_edges() {
        let r = Rectangle::new(
            Point::new(10.0, 10.0),
            Point::new(100.0, 80.0),
            ShapeStyle::default(),
        );
        assert!(r.hit_test(Point::new(50.0, 50.0)));
        // The stored start corner always hits
        assert!(r.hit_test(Point::new(10.0, 10.0)));
        assert!(r.hit_test(Point::new(100.0, 80.0)));
        assert!(!r.hit_test(Point::new(101.0, 50.0)));
    }

    #[test]
    fn test_reversed_corners() {
        let r = Rectangle::new(
            Point::new(100.0, 80.0),
            Point::new(10.0, 10.0),
            ShapeStyle::default(),
        );
        assert_eq!(r.as_rect(), Rect::new(10.0, 10.0, 100.0, 80.0));
        // The stored start is the max corner here; it still hits
        assert!(r.hit_test(Point::new(100.0, 80.0)));
    }

    #[test]
    fn test_translate() {
        let mut r = Rectangle::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            ShapeStyle::default(),
        );
        r.translate(Vec2::new(5.0, 7.0));
        assert_eq!(r.start, Point::new(5.0, 7.0));
        assert_eq!(r.end, Point::new(15.0, 17.0));
    }
}
