//! tiny-skia implementation of the full-redraw raster pipeline.
//!
//! Every qualifying mutation re-renders the whole surface: clear, apply the
//! view transform, draw committed shapes back to front, then the active
//! preview, then the in-progress stroke. Selection outlines and the marquee
//! are a separate screen-space pass that never reaches the exported raster.

use crate::export::encode_png;
use crate::renderer::{
    RenderError, RenderResult, OVERLAY_COLOR, OVERLAY_DASH, OVERLAY_STROKE_WIDTH,
};
use easel_core::selection::OUTLINE_MARGIN;
use easel_core::shapes::{Freehand, Image, Raster, Rgba, Shape};
use easel_core::{Camera, Canvas, SurfaceConfig};
use kurbo::{Affine, Point, Rect};
use tiny_skia::{
    LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash, Transform,
};

/// Renders a canvas into RGBA pixmaps.
pub struct SurfaceRenderer {
    width: u32,
    height: u32,
    background: Rgba,
}

impl SurfaceRenderer {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            width: config.width.round() as u32,
            height: config.height.round() as u32,
            background: config.background,
        }
    }

    /// Render the persisted output: committed shapes, the shape preview,
    /// and the in-progress stroke, under the view transform. No overlays.
    pub fn render_scene(&self, canvas: &Canvas) -> RenderResult<Pixmap> {
        let mut pixmap = Pixmap::new(self.width, self.height).ok_or(RenderError::InvalidSurface {
            width: self.width,
            height: self.height,
        })?;
        pixmap.fill(to_color(self.background));

        let ts = to_transform(canvas.camera.transform());
        for shape in canvas.document.shapes() {
            draw_shape(&mut pixmap, shape, ts);
        }
        if let Some(preview) = canvas.preview_shape() {
            draw_shape(&mut pixmap, &preview, ts);
        }
        if let Some(stroke) = canvas.current_stroke() {
            draw_freehand(&mut pixmap, stroke, ts);
        }
        Ok(pixmap)
    }

    /// Render the interactive frame: the scene plus dashed selection
    /// outlines and the marquee rectangle in screen space.
    pub fn render_frame(&self, canvas: &Canvas) -> RenderResult<Pixmap> {
        let mut pixmap = self.render_scene(canvas)?;

        for &index in canvas.selection.indices() {
            if let Some(shape) = canvas.document.shapes().get(index) {
                let screen = map_to_screen(&canvas.camera, shape.bounds())
                    .inflate(OUTLINE_MARGIN, OUTLINE_MARGIN);
                draw_dashed_rect(&mut pixmap, screen);
            }
        }
        if let Some(marquee) = canvas.marquee_rect() {
            draw_dashed_rect(&mut pixmap, map_to_screen(&canvas.camera, marquee));
        }
        Ok(pixmap)
    }

    /// Render the scene and encode it as PNG bytes.
    pub fn export_png(&self, canvas: &Canvas) -> RenderResult<Vec<u8>> {
        let pixmap = self.render_scene(canvas)?;
        encode_png(&pixmap)
    }
}

/// Draw one committed or provisional shape under the view transform.
fn draw_shape(pixmap: &mut Pixmap, shape: &Shape, ts: Transform) {
    match shape {
        Shape::Freehand(stroke) => draw_freehand(pixmap, stroke, ts),
        Shape::Ellipse(ellipse) => {
            let center = ellipse.center();
            let (rx, ry) = ellipse.radii();
            let Some(oval) = tiny_skia::Rect::from_ltrb(
                (center.x - rx) as f32,
                (center.y - ry) as f32,
                (center.x + rx) as f32,
                (center.y + ry) as f32,
            ) else {
                return;
            };
            let mut pb = PathBuilder::new();
            pb.push_oval(oval);
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(
                    &path,
                    &paint_for(ellipse.style.color),
                    &stroke_for(ellipse.style.width),
                    ts,
                    None,
                );
            }
        }
        Shape::Rectangle(rect) => {
            let bounds = rect.as_rect();
            let Some(r) = tiny_skia::Rect::from_ltrb(
                bounds.x0 as f32,
                bounds.y0 as f32,
                bounds.x1 as f32,
                bounds.y1 as f32,
            ) else {
                return;
            };
            let path = PathBuilder::from_rect(r);
            pixmap.stroke_path(
                &path,
                &paint_for(rect.style.color),
                &stroke_for(rect.style.width),
                ts,
                None,
            );
        }
        Shape::Triangle(triangle) => {
            let [apex, base_right, base_left] = triangle.vertices();
            let mut pb = PathBuilder::new();
            pb.move_to(apex.x as f32, apex.y as f32);
            pb.line_to(base_right.x as f32, base_right.y as f32);
            pb.line_to(base_left.x as f32, base_left.y as f32);
            pb.close();
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(
                    &path,
                    &paint_for(triangle.style.color),
                    &stroke_for(triangle.style.width),
                    ts,
                    None,
                );
            }
        }
        Shape::Line(line) => {
            let mut pb = PathBuilder::new();
            pb.move_to(line.start.x as f32, line.start.y as f32);
            pb.line_to(line.end.x as f32, line.end.y as f32);
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(
                    &path,
                    &paint_for(line.style.color),
                    &stroke_for(line.style.width),
                    ts,
                    None,
                );
            }
        }
        Shape::Image(image) => draw_image(pixmap, image, ts),
    }
}

/// Draw a stroke as one continuous polyline with round joins and caps.
/// Strokes with fewer than two points are not drawn.
fn draw_freehand(pixmap: &mut Pixmap, stroke: &Freehand, ts: Transform) {
    if stroke.len() < 2 {
        return;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(stroke.points[0].x as f32, stroke.points[0].y as f32);
    for p in &stroke.points[1..] {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &paint_for(stroke.style.color),
            &stroke_for(stroke.style.width),
            ts,
            None,
        );
    }
}

/// Draw a placed image, scaled from its natural size into the placement
/// rect.
fn draw_image(pixmap: &mut Pixmap, image: &Image, ts: Transform) {
    let Some(src) = pixmap_from_raster(&image.raster) else {
        log::warn!("skipping image with unusable raster data");
        return;
    };
    let sx = image.rect.width() / f64::from(image.raster.width());
    let sy = image.rect.height() / f64::from(image.raster.height());
    let transform = ts
        .pre_translate(image.rect.x0 as f32, image.rect.y0 as f32)
        .pre_scale(sx as f32, sy as f32);
    let paint = PixmapPaint {
        quality: tiny_skia::FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
}

/// Convert straight RGBA8 raster data into a premultiplied pixmap.
fn pixmap_from_raster(raster: &Raster) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(raster.width(), raster.height())?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(raster.pixels().chunks_exact(4))
    {
        *dst = tiny_skia::ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

/// Dashed screen-space outline used for selection boxes and the marquee.
fn draw_dashed_rect(pixmap: &mut Pixmap, rect: Rect) {
    let Some(r) = tiny_skia::Rect::from_ltrb(
        rect.x0 as f32,
        rect.y0 as f32,
        rect.x1 as f32,
        rect.y1 as f32,
    ) else {
        return;
    };
    let path = PathBuilder::from_rect(r);
    let stroke = Stroke {
        width: OVERLAY_STROKE_WIDTH,
        dash: StrokeDash::new(OVERLAY_DASH.to_vec(), 0.0),
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint_for(OVERLAY_COLOR), &stroke, Transform::identity(), None);
}

/// Map a drawing-space rect onto the screen.
fn map_to_screen(camera: &Camera, rect: Rect) -> Rect {
    Rect::from_points(
        camera.drawing_to_screen(Point::new(rect.x0, rect.y0)),
        camera.drawing_to_screen(Point::new(rect.x1, rect.y1)),
    )
}

fn to_transform(affine: Affine) -> Transform {
    let c = affine.as_coeffs();
    Transform::from_row(
        c[0] as f32,
        c[1] as f32,
        c[2] as f32,
        c[3] as f32,
        c[4] as f32,
        c[5] as f32,
    )
}

fn to_color(color: Rgba) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn paint_for(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn stroke_for(width: f64) -> Stroke {
    Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::shapes::{Rectangle, ShapeStyle};
    use easel_core::{Modifiers, ToolKind, ToolState};
    use std::sync::Arc;

    fn red_rect_canvas() -> Canvas {
        let mut canvas = Canvas::default();
        canvas.document.commit(Shape::Rectangle(Rectangle::new(
            Point::new(10.0, 10.0),
            Point::new(100.0, 80.0),
            ShapeStyle::new(Rgba::opaque(255, 0, 0), 4.0),
        )));
        canvas
    }

    fn pixel_rgba(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        (c.red(), c.green(), c.blue(), c.alpha())
    }

    #[test]
    fn test_background_fill() {
        let canvas = Canvas::default();
        let renderer = SurfaceRenderer::new(canvas.config());
        let pixmap = renderer.render_scene(&canvas).unwrap();
        assert_eq!(pixmap.width(), 800);
        assert_eq!(pixmap.height(), 600);
        assert_eq!(pixel_rgba(&pixmap, 0, 0), (255, 255, 255, 255));
    }

    #[test]
    fn test_rectangle_outline_pixels() {
        let canvas = red_rect_canvas();
        let renderer = SurfaceRenderer::new(canvas.config());
        let pixmap = renderer.render_scene(&canvas).unwrap();
        // Center of the 4-wide stroke along the left edge
        assert_eq!(pixel_rgba(&pixmap, 10, 45), (255, 0, 0, 255));
        // Interior stays background; the outline is not filled
        assert_eq!(pixel_rgba(&pixmap, 55, 45), (255, 255, 255, 255));
    }

    #[test]
    fn test_render_is_deterministic() {
        let canvas = red_rect_canvas();
        let renderer = SurfaceRenderer::new(canvas.config());
        let a = renderer.render_scene(&canvas).unwrap();
        let b = renderer.render_scene(&canvas).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_overlays_only_in_frame() {
        let mut canvas = red_rect_canvas();
        let mut state = canvas.tool_state();
        state.tool = ToolKind::Select;
        canvas.set_tool_state(state);
        canvas.pointer_down(Point::new(50.0, 50.0), Modifiers::NONE);
        canvas.pointer_up(Point::new(50.0, 50.0), Modifiers::NONE);
        assert!(!canvas.selection.is_empty());

        let renderer = SurfaceRenderer::new(canvas.config());
        let scene = renderer.render_scene(&canvas).unwrap();
        let frame = renderer.render_frame(&canvas).unwrap();
        assert_ne!(scene.data(), frame.data());

        let overlay = tiny_skia::ColorU8::from_rgba(
            OVERLAY_COLOR.r,
            OVERLAY_COLOR.g,
            OVERLAY_COLOR.b,
            OVERLAY_COLOR.a,
        );
        assert!(frame.pixels().iter().any(|p| p.demultiply() == overlay));
        assert!(!scene.pixels().iter().any(|p| p.demultiply() == overlay));
    }

    #[test]
    fn test_preview_is_drawn() {
        let mut canvas = Canvas::default();
        canvas.set_tool_state(ToolState {
            tool: ToolKind::Line,
            color: Rgba::opaque(0, 0, 255),
            width: 6.0,
        });
        canvas.pointer_down(Point::new(100.0, 300.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(500.0, 300.0), Modifiers::NONE);

        let renderer = SurfaceRenderer::new(canvas.config());
        let pixmap = renderer.render_scene(&canvas).unwrap();
        assert_eq!(pixel_rgba(&pixmap, 300, 300), (0, 0, 255, 255));
    }

    #[test]
    fn test_image_pixels() {
        let config = SurfaceConfig {
            width: 100.0,
            height: 100.0,
            background: Rgba::white(),
        };
        let mut canvas = Canvas::new(config);
        let ticket = canvas.begin_import();
        let raster = Arc::new(Raster::solid(10, 10, Rgba::opaque(0, 128, 0)));
        assert!(canvas.complete_import(ticket, raster));

        let renderer = SurfaceRenderer::new(config);
        let pixmap = renderer.render_scene(&canvas).unwrap();
        assert_eq!(pixel_rgba(&pixmap, 50, 50), (0, 128, 0, 255));
    }

    #[test]
    fn test_zero_surface_is_an_error() {
        let config = SurfaceConfig {
            width: 0.0,
            height: 600.0,
            background: Rgba::white(),
        };
        let renderer = SurfaceRenderer::new(config);
        assert!(matches!(
            renderer.render_scene(&Canvas::new(config)),
            Err(RenderError::InvalidSurface { .. })
        ));
    }
}
