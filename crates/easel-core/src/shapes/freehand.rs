//! Freehand stroke shape.

use super::{ShapeOps, ShapeStyle};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke: an ordered sequence of drawing-space points.
///
/// Points are append-only while the stroke is being captured; after commit
/// the geometry only changes through group translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Freehand {
    /// Sampled points, in capture order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Freehand {
    /// Start a stroke from its press position.
    pub fn begin(first: Point, style: ShapeStyle) -> Self {
        Self {
            points: vec![first],
            style,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, style: ShapeStyle) -> Self {
        Self { points, style }
    }

    /// Append a sampled point. Every move event is kept; no decimation.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeOps for Freehand {
    fn bounds(&self) -> Rect {
        let mut points = self.points.iter();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in points {
            rect.x0 = rect.x0.min(p.x);
            rect.y0 = rect.y0.min(p.y);
            rect.x1 = rect.x1.max(p.x);
            rect.y1 = rect.y1.max(p.y);
        }
        rect
    }

    /// Coarse proximity test: the point must land within ±width of any
    /// sampled point. Not a true path distance.
    fn hit_test(&self, point: Point) -> bool {
        let reach = self.style.width;
        self.points
            .iter()
            .any(|p| (p.x - point.x).abs() < reach && (p.y - point.y).abs() < reach)
    }

    fn reference_point(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(f64, f64)]) -> Freehand {
        Freehand::from_points(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            ShapeStyle::default(),
        )
    }

    #[test]
    fn test_capture_appends() {
        let mut s = Freehand::begin(Point::new(0.0, 0.0), ShapeStyle::default());
        s.add_point(Point::new(5.0, 5.0));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_bounds() {
        let s = stroke(&[(0.0, 0.0), (100.0, 50.0), (50.0, 100.0)]);
        let bounds = s.bounds();
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_near_sampled_point() {
        let s = stroke(&[(0.0, 0.0), (100.0, 0.0)]);
        assert!(s.hit_test(Point::new(2.0, 2.0)));
        assert!(s.hit_test(Point::new(98.0, -2.0)));
        // Between the two samples but far from both: the coarse test misses
        assert!(!s.hit_test(Point::new(50.0, 0.0)));
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut s = stroke(&[(0.0, 0.0), (10.0, 10.0)]);
        s.translate(Vec2::new(5.0, -5.0));
        assert_eq!(s.points[0], Point::new(5.0, -5.0));
        assert_eq!(s.points[1], Point::new(15.0, 5.0));
    }

    #[test]
    fn test_reference_point_is_first() {
        let s = stroke(&[(7.0, 8.0), (9.0, 10.0)]);
        assert_eq!(s.reference_point(), Point::new(7.0, 8.0));
    }
}
