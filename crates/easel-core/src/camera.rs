//! Camera module: the view transform and its zoom controls.

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.2;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;

/// Per-tick wheel zoom factors.
const WHEEL_STEP_IN: f64 = 1.1;
const WHEEL_STEP_OUT: f64 = 0.9;

/// The view transform: a zoom factor applied around an anchor point.
///
/// Drawing space maps to screen space as
/// translate(anchor) · scale(zoom) · translate(−anchor); input mapping uses
/// the exact algebraic inverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current zoom level, kept within [`MIN_ZOOM`, `MAX_ZOOM`].
    pub zoom: f64,
    /// The fixed point of the zoom.
    pub anchor: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            anchor: Point::ZERO,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a screen point into drawing space.
    pub fn screen_to_drawing(&self, p: Point) -> Point {
        self.anchor + (p - self.anchor) / self.zoom
    }

    /// Map a drawing-space point onto the screen.
    pub fn drawing_to_screen(&self, d: Point) -> Point {
        self.anchor + (d - self.anchor) * self.zoom
    }

    /// The drawing→screen transform, for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.anchor.to_vec2())
            * Affine::scale(self.zoom)
            * Affine::translate(-self.anchor.to_vec2())
    }

    /// Apply one wheel tick at the cursor. Scrolling up (negative delta)
    /// zooms in by 10%, down zooms out; each tick re-anchors at the cursor.
    pub fn wheel_zoom(&mut self, cursor: Point, delta: f64) {
        let step = if delta < 0.0 {
            WHEEL_STEP_IN
        } else {
            WHEEL_STEP_OUT
        };
        self.zoom = (self.zoom * step).clamp(MIN_ZOOM, MAX_ZOOM);
        self.anchor = cursor;
    }

    /// Scale the zoom by a pinch ratio. The anchor is intentionally left
    /// where the last wheel tick put it; the zoom center may drift relative
    /// to the contact points.
    pub fn pinch_scale(&mut self, ratio: f64) {
        self.zoom = (self.zoom * ratio).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}
