use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgba, RgbaImage};
use log::debug;

use super::Overlay;
use super::layout::Layout;
use crate::error::RenderError;

/// Square raster of exactly `size` pixels. Modules are whole pixels; the
/// leftover from the integer division is split evenly around the symbol.
/// Each pixel takes the colour of the shape under its centre.
pub(super) fn render(layout: &Layout<'_>) -> Result<Vec<u8>, RenderError> {
    let options = layout.options();
    let total = layout.total;
    if options.size < total {
        return Err(RenderError::InvalidSize(options.size));
    }
    let module_px = options.size / total;
    let offset = (options.size - module_px * total) / 2 + options.margin * module_px;
    let symbol_px = (total - 2 * options.margin) * module_px;
    let scale = f64::from(module_px);

    let background = options.background.to_rgba();
    let mut img: RgbaImage = ImageBuffer::from_fn(options.size, options.size, |x, y| {
        let inside = (offset..offset + symbol_px).contains(&x)
            && (offset..offset + symbol_px).contains(&y);
        if !inside {
            return background;
        }
        let u = (f64::from(x - offset) + 0.5) / scale;
        let v = (f64::from(y - offset) + 0.5) / scale;
        match layout.paint_at(u, v) {
            Some(paint) => layout.color(paint, u, v).to_rgba(),
            None => background,
        }
    });

    if let Some(overlay) = &options.overlay {
        draw_overlay(&mut img, overlay)?;
    }

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Scale the overlay to its share of the output width and blend it over the centre
fn draw_overlay(img: &mut RgbaImage, overlay: &Overlay) -> Result<(), RenderError> {
    let picture = image::load_from_memory(&overlay.image)?.to_rgba8();
    let (width, height) = picture.dimensions();
    if width == 0 || height == 0 {
        return Ok(());
    }

    let target_w = ((f64::from(img.width()) * overlay.scale).round() as u32).clamp(1, img.width());
    let target_h = (u64::from(height) * u64::from(target_w) / u64::from(width))
        .clamp(1, u64::from(img.height())) as u32;
    let scaled: ImageBuffer<Rgba<u8>, Vec<u8>> =
        imageops::resize(&picture, target_w, target_h, FilterType::Triangle);

    let x = (img.width() - target_w) / 2;
    let y = (img.height() - target_h) / 2;
    debug!("overlay {width}x{height} drawn at {target_w}x{target_h} from ({x}, {y})");
    imageops::overlay(img, &scaled, i64::from(x), i64::from(y));
    Ok(())
}
