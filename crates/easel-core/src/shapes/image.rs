//! Image shape for placed raster images.

use super::{Rgba, ShapeOps};
use kurbo::{Point, Rect, Size, Vec2};
use std::sync::Arc;

/// A decoded RGBA8 raster, shared between the document and the renderer.
///
/// Decoding bytes into pixels is the caller's concern; the core only
/// consumes the finished pixels and their dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Wrap decoded pixels. `pixels` holds `width * height` RGBA8 values
    /// in row-major order.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A uniformly colored raster.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// A placed raster image.
#[derive(Debug, Clone)]
pub struct Image {
    /// Placement rect in drawing space, fixed at commit time.
    pub rect: Rect,
    /// The shared pixel data.
    pub raster: Arc<Raster>,
}

impl Image {
    /// Place a raster scaled to fit the surface bounds, preserving aspect
    /// ratio, centered. The placement is computed once, here.
    pub fn fitted(raster: Arc<Raster>, surface: Size) -> Self {
        let iw = f64::from(raster.width());
        let ih = f64::from(raster.height());
        if iw == 0.0 || ih == 0.0 {
            return Self {
                rect: Rect::ZERO,
                raster,
            };
        }
        let scale = (surface.width / iw).min(surface.height / ih);
        let w = iw * scale;
        let h = ih * scale;
        let x = (surface.width - w) / 2.0;
        let y = (surface.height - h) / 2.0;
        Self {
            rect: Rect::new(x, y, x + w, y + h),
            raster,
        }
    }
}

impl ShapeOps for Image {
    fn bounds(&self) -> Rect {
        self.rect
    }

    /// Containment against the placement rect, edges included.
    fn hit_test(&self, point: Point) -> bool {
        point.x >= self.rect.x0
            && point.x <= self.rect.x1
            && point.y >= self.rect.y0
            && point.y <= self.rect.y1
    }

    fn reference_point(&self) -> Point {
        self.rect.origin()
    }

    fn translate(&mut self, delta: Vec2) {
        self.rect = self.rect + delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_image() {
        // 2:1 raster into an 800x600 surface: fit to width, centered
        let raster = Arc::new(Raster::solid(200, 100, Rgba::white()));
        let img = Image::fitted(raster, Size::new(800.0, 600.0));
        assert!((img.rect.width() - 800.0).abs() < 1e-9);
        assert!((img.rect.height() - 400.0).abs() < 1e-9);
        assert!((img.rect.y0 - 100.0).abs() < 1e-9);
        assert!((img.rect.x0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_tall_image() {
        let raster = Arc::new(Raster::solid(100, 300, Rgba::white()));
        let img = Image::fitted(raster, Size::new(800.0, 600.0));
        assert!((img.rect.height() - 600.0).abs() < 1e-9);
        assert!((img.rect.width() - 200.0).abs() < 1e-9);
        assert!((img.rect.x0 - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_and_translate() {
        let raster = Arc::new(Raster::solid(100, 100, Rgba::white()));
        let mut img = Image::fitted(raster, Size::new(100.0, 100.0));
        assert!(img.hit_test(Point::new(0.0, 0.0)));
        assert!(img.hit_test(Point::new(100.0, 100.0)));
        img.translate(Vec2::new(50.0, 0.0));
        assert!(!img.hit_test(Point::new(10.0, 10.0)));
        assert!(img.hit_test(Point::new(60.0, 10.0)));
    }

    #[test]
    fn test_solid_raster_pixels() {
        let raster = Raster::solid(2, 2, Rgba::opaque(10, 20, 30));
        assert_eq!(raster.pixels().len(), 16);
        assert_eq!(&raster.pixels()[0..4], &[10, 20, 30, 255]);
    }
}
