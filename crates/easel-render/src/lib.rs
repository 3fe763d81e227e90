//! Easel renderer.
//!
//! Deterministic CPU raster pipeline for the easel drawing surface, plus
//! PNG export of the final raster.

pub mod export;
pub mod renderer;
pub mod skia_impl;

pub use export::encode_png;
pub use renderer::{RenderError, RenderResult};
pub use skia_impl::SurfaceRenderer;
