use std::io::Cursor;

use ab_glyph::PxScale;
use image::RgbImage;
use imageproc::drawing::draw_text_mut;

use crate::error::{CardError, CardResult};
use crate::font::FontHandle;
use crate::layout::PositionedRun;

/// Burns each positioned run onto the canvas in list order.
///
/// Painter's algorithm: later runs overwrite earlier ones where they
/// overlap. The canvas is mutated in place.
pub fn paint(canvas: &mut RgbImage, runs: &[PositionedRun], font: &FontHandle) -> CardResult<()> {
    for run in runs {
        let color = image::Rgb([
            run.directive.color.r,
            run.directive.color.g,
            run.directive.color.b,
        ]);
        draw_text_mut(
            canvas,
            color,
            run.x,
            run.y,
            PxScale::from(run.directive.size),
            font.font(),
            &run.directive.text,
        );
    }
    Ok(())
}

/// Encodes the finished canvas as JPEG.
pub fn encode_jpeg(canvas: &RgbImage) -> CardResult<Vec<u8>> {
    let mut buf = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .map_err(|e| CardError::encode(format!("jpeg: {e}")))?;
    Ok(buf)
}
