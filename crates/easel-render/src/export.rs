//! PNG encoding of rendered pixmaps.

use crate::renderer::RenderResult;
use tiny_skia::Pixmap;

/// Encode a rendered pixmap as PNG bytes (RGBA, 8-bit depth).
pub fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&demultiplied_rgba(pixmap))?;
    }
    log::debug!("encoded {} PNG bytes", data.len());
    Ok(data)
}

/// tiny-skia stores premultiplied pixels; PNG wants straight alpha.
fn demultiplied_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}
