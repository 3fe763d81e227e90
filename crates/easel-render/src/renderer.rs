//! Shared renderer types.

use easel_core::Rgba;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Color of selection outlines and the marquee rectangle.
pub const OVERLAY_COLOR: Rgba = Rgba::new(59, 130, 246, 255);

/// Overlay outline width in screen units.
pub const OVERLAY_STROKE_WIDTH: f32 = 2.0;

/// On/off lengths of the overlay dash pattern, in screen units.
pub const OVERLAY_DASH: [f32; 2] = [4.0, 4.0];
