//! Tool state and construction rules.

use crate::shapes::Rgba;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pencil,
    Pen,
    Eraser,
    Ellipse,
    Rectangle,
    Triangle,
    Line,
    Select,
}

impl ToolKind {
    /// Tools that capture freehand strokes.
    pub fn is_freehand(self) -> bool {
        matches!(self, ToolKind::Pencil | ToolKind::Pen | ToolKind::Eraser)
    }

    /// The parametric shape kind this tool constructs, if any.
    pub fn parametric(self) -> Option<ParametricKind> {
        match self {
            ToolKind::Ellipse => Some(ParametricKind::Ellipse),
            ToolKind::Rectangle => Some(ParametricKind::Rectangle),
            ToolKind::Triangle => Some(ParametricKind::Triangle),
            ToolKind::Line => Some(ParametricKind::Line),
            _ => None,
        }
    }
}

/// The two-corner shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParametricKind {
    Ellipse,
    Rectangle,
    Triangle,
    Line,
}

/// The active tool, color, and base stroke width, as produced by the
/// (external) picker UI. The shift constraint arrives separately with each
/// pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub tool: ToolKind,
    pub color: Rgba,
    pub width: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            color: Rgba::black(),
            width: 4.0,
        }
    }
}

/// Stroke width derived from the base width: the pen draws at half, the
/// eraser at double.
pub fn stroke_width(tool: ToolKind, base: f64) -> f64 {
    match tool {
        ToolKind::Pen => base / 2.0,
        ToolKind::Eraser => base * 2.0,
        _ => base,
    }
}

/// Stroke color for a freehand tool. The eraser paints the surface
/// background; erasure is overpainting, not alpha clearing.
pub fn stroke_color(tool: ToolKind, active: Rgba, background: Rgba) -> Rgba {
    if tool == ToolKind::Eraser {
        background
    } else {
        active
    }
}

/// Apply the shift constraint to a candidate end point.
///
/// Ellipse, rectangle, and triangle snap to a square corner box; lines snap
/// to horizontal, vertical, or the 45° diagonal.
pub fn constrain_end(start: Point, end: Point, kind: ParametricKind, constrained: bool) -> Point {
    if !constrained {
        return end;
    }
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    match kind {
        ParametricKind::Ellipse | ParametricKind::Rectangle | ParametricKind::Triangle => {
            let len = dx.abs().min(dy.abs());
            Point::new(start.x + dx.signum() * len, start.y + dy.signum() * len)
        }
        ParametricKind::Line => {
            if dx.abs() > dy.abs() {
                Point::new(end.x, start.y)
            } else if dy.abs() > dx.abs() {
                Point::new(start.x, end.y)
            } else {
                Point::new(start.x + dx.signum() * dy.abs(), start.y + dy.signum() * dx.abs())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_widths() {
        assert!((stroke_width(ToolKind::Pencil, 4.0) - 4.0).abs() < f64::EPSILON);
        assert!((stroke_width(ToolKind::Pen, 4.0) - 2.0).abs() < f64::EPSILON);
        assert!((stroke_width(ToolKind::Eraser, 4.0) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_eraser_paints_background() {
        let active = Rgba::opaque(255, 0, 0);
        let background = Rgba::white();
        assert_eq!(stroke_color(ToolKind::Pencil, active, background), active);
        assert_eq!(stroke_color(ToolKind::Eraser, active, background), background);
    }

    #[test]
    fn test_unconstrained_passthrough() {
        let start = Point::new(10.0, 10.0);
        let end = Point::new(70.0, 40.0);
        assert_eq!(constrain_end(start, end, ParametricKind::Rectangle, false), end);
    }

    #[test]
    fn test_square_constraint() {
        let start = Point::new(10.0, 10.0);
        let end = Point::new(70.0, 40.0);
        // len = min(60, 30) = 30, both deltas positive
        let snapped = constrain_end(start, end, ParametricKind::Rectangle, true);
        assert_eq!(snapped, Point::new(40.0, 40.0));

        // Negative x direction keeps its sign
        let end = Point::new(-50.0, 30.0);
        let snapped = constrain_end(start, end, ParametricKind::Ellipse, true);
        assert_eq!(snapped, Point::new(-10.0, 30.0));
    }

    #[test]
    fn test_line_snaps_to_axis() {
        let start = Point::new(0.0, 0.0);
        // Mostly horizontal drag snaps flat
        assert_eq!(
            constrain_end(start, Point::new(80.0, 20.0), ParametricKind::Line, true),
            Point::new(80.0, 0.0)
        );
        // Mostly vertical drag snaps upright
        assert_eq!(
            constrain_end(start, Point::new(20.0, -90.0), ParametricKind::Line, true),
            Point::new(0.0, -90.0)
        );
    }

    #[test]
    fn test_line_diagonal_tie() {
        let start = Point::new(0.0, 0.0);
        let snapped = constrain_end(start, Point::new(-30.0, 30.0), ParametricKind::Line, true);
        assert_eq!(snapped, Point::new(-30.0, 30.0));
    }
}
