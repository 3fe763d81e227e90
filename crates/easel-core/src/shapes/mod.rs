//! Shape definitions for the drawing surface.

mod ellipse;
mod freehand;
mod image;
mod line;
mod rectangle;
mod triangle;

pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use image::{Image, Raster};
pub use line::Line;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// RGBA8 color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::opaque(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::opaque(255, 255, 255)
    }

    /// Parse a hex color string (`#rgb`, `#rrggbb`, or `#rrggbbaa`).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::opaque(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::opaque(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }
}

/// Stroke properties shared by drawn shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub color: Rgba,
    /// Stroke width.
    pub width: f64,
}

impl ShapeStyle {
    pub fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: Rgba::black(),
            width: 4.0,
        }
    }
}

/// Geometry operations every shape kind supports.
pub trait ShapeOps {
    /// Bounding box in drawing-space coordinates.
    fn bounds(&self) -> Rect;

    /// Whether a drawing-space point hits this shape.
    fn hit_test(&self, point: Point) -> bool;

    /// The point drags are rebased against (first stroke point, `start`,
    /// or the placement origin).
    fn reference_point(&self) -> Point;

    /// Move the shape by a drawing-space delta.
    fn translate(&mut self, delta: Vec2);
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    point.distance(proj)
}

/// A committed, persisted drawable unit.
#[derive(Debug, Clone)]
pub enum Shape {
    Freehand(Freehand),
    Ellipse(Ellipse),
    Rectangle(Rectangle),
    Triangle(Triangle),
    Line(Line),
    Image(Image),
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freehand(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Freehand(s) => s.hit_test(point),
            Shape::Ellipse(s) => s.hit_test(point),
            Shape::Rectangle(s) => s.hit_test(point),
            Shape::Triangle(s) => s.hit_test(point),
            Shape::Line(s) => s.hit_test(point),
            Shape::Image(s) => s.hit_test(point),
        }
    }

    pub fn reference_point(&self) -> Point {
        match self {
            Shape::Freehand(s) => s.reference_point(),
            Shape::Ellipse(s) => s.reference_point(),
            Shape::Rectangle(s) => s.reference_point(),
            Shape::Triangle(s) => s.reference_point(),
            Shape::Line(s) => s.reference_point(),
            Shape::Image(s) => s.reference_point(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Freehand(s) => s.translate(delta),
            Shape::Ellipse(s) => s.translate(delta),
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Triangle(s) => s.translate(delta),
            Shape::Line(s) => s.translate(delta),
            Shape::Image(s) => s.translate(delta),
        }
    }

    /// Stroke style, for the shape kinds that carry one.
    pub fn style(&self) -> Option<&ShapeStyle> {
        match self {
            Shape::Freehand(s) => Some(&s.style),
            Shape::Ellipse(s) => Some(&s.style),
            Shape::Rectangle(s) => Some(&s.style),
            Shape::Triangle(s) => Some(&s.style),
            Shape::Line(s) => Some(&s.style),
            Shape::Image(_) => None,
        }
    }

    /// Overwrite the stroke color in place. Images carry no color; no-op.
    pub fn set_color(&mut self, color: Rgba) {
        match self {
            Shape::Freehand(s) => s.style.color = color,
            Shape::Ellipse(s) => s.style.color = color,
            Shape::Rectangle(s) => s.style.color = color,
            Shape::Triangle(s) => s.style.color = color,
            Shape::Line(s) => s.style.color = color,
            Shape::Image(_) => {}
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Shape::Image(img) => Some(img),
            _ => None,
        }
    }
}
