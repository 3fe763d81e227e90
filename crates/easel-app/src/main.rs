//! Headless demo driver.
//!
//! Replays a short scripted session against a canvas and writes the
//! resulting surface to `easel.png`. Interactive chrome (pickers, file
//! dialogs, windowing) is intentionally absent; this exists to exercise the
//! core and the raster pipeline end to end.

use std::sync::Arc;

use easel_core::shapes::{Raster, Rgba};
use easel_core::{Canvas, Modifiers, SurfaceConfig, ToolKind, ToolState};
use easel_render::SurfaceRenderer;
use kurbo::Point;

fn main() {
    env_logger::init();
    log::info!("starting easel demo session");

    let mut canvas = Canvas::new(SurfaceConfig::default());

    // A small imported photo stand-in behind everything else.
    let ticket = canvas.begin_import();
    canvas.complete_import(ticket, Arc::new(checkerboard(64, 48)));

    // Freehand squiggle with the pencil.
    set_tool(&mut canvas, ToolKind::Pencil, "#B03030", 4.0);
    canvas.pointer_down(Point::new(120.0, 420.0), Modifiers::NONE);
    for i in 1..=40 {
        let t = f64::from(i) / 40.0;
        let x = 120.0 + t * 260.0;
        let y = 420.0 + (t * std::f64::consts::TAU * 2.0).sin() * 40.0;
        canvas.pointer_move(Point::new(x, y), Modifiers::NONE);
    }
    canvas.pointer_up(Point::new(380.0, 420.0), Modifiers::NONE);

    // A shift-constrained square and a plain ellipse.
    set_tool(&mut canvas, ToolKind::Rectangle, "#1976D2", 4.0);
    drag(&mut canvas, (80.0, 80.0), (240.0, 210.0), Modifiers::SHIFT);
    set_tool(&mut canvas, ToolKind::Ellipse, "#2E7D32", 6.0);
    drag(&mut canvas, (420.0, 120.0), (640.0, 260.0), Modifiers::NONE);

    // Select the square and nudge it right.
    set_tool(&mut canvas, ToolKind::Select, "#2E7D32", 6.0);
    drag(&mut canvas, (120.0, 120.0), (150.0, 120.0), Modifiers::NONE);

    // One step back and forward again, for the log.
    canvas.undo();
    canvas.redo();

    let renderer = SurfaceRenderer::new(canvas.config());
    match renderer.export_png(&canvas) {
        Ok(bytes) => {
            if let Err(e) = std::fs::write("easel.png", &bytes) {
                log::error!("failed to write easel.png: {e}");
            } else {
                log::info!(
                    "wrote easel.png ({} bytes, {} shapes)",
                    bytes.len(),
                    canvas.document.len()
                );
            }
        }
        Err(e) => log::error!("render failed: {e}"),
    }
}

fn set_tool(canvas: &mut Canvas, tool: ToolKind, color: &str, width: f64) {
    canvas.set_tool_state(ToolState {
        tool,
        color: Rgba::from_hex(color).unwrap_or(Rgba::black()),
        width,
    });
}

fn drag(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
    canvas.pointer_down(Point::new(from.0, from.1), modifiers);
    canvas.pointer_move(Point::new(to.0, to.1), modifiers);
    canvas.pointer_up(Point::new(to.0, to.1), modifiers);
}

/// A gray checkerboard raster, in place of a decoded image file.
fn checkerboard(width: u32, height: u32) -> Raster {
    let light = Rgba::opaque(220, 220, 220);
    let dark = Rgba::opaque(160, 160, 160);
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let c = if (x / 8 + y / 8) % 2 == 0 { light } else { dark };
            pixels.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
    Raster::new(width, height, pixels)
}
