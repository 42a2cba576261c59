use image::RgbImage;
use image::imageops::FilterType;

use crate::error::{CardError, CardResult};

/// Decodes raw background bytes and resizes them to exactly
/// `target_w x target_h`, discarding the original aspect ratio.
pub fn normalize(raw: &[u8], target_w: u32, target_h: u32) -> CardResult<RgbImage> {
    if target_w == 0 || target_h == 0 {
        return Err(CardError::resize(format!(
            "target dimensions must be positive, got {target_w}x{target_h}"
        )));
    }
    let decoded = image::load_from_memory(raw)
        .map_err(|e| CardError::decode(format!("background image: {e}")))?;
    Ok(decoded
        .resize_exact(target_w, target_h, FilterType::Lanczos3)
        .to_rgb8())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn one_pixel_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(1, 1, image::Rgb([12, 200, 34]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn one_pixel_input_stretches_to_full_canvas() {
        let canvas = normalize(&one_pixel_png(), 1080, 1277).unwrap();
        assert_eq!(canvas.dimensions(), (1080, 1277));
        // A single-color source stays single-color after resampling,
        // modulo float rounding in the filter.
        for px in [canvas.get_pixel(0, 0), canvas.get_pixel(1079, 1276)] {
            assert!((px[0] as i32 - 12).abs() <= 1);
            assert!((px[1] as i32 - 200).abs() <= 1);
            assert!((px[2] as i32 - 34).abs() <= 1);
        }
    }

    #[test]
    fn malformed_bytes_are_a_decode_error() {
        let err = normalize(b"not an image", 1080, 1277).unwrap_err();
        assert!(matches!(err, CardError::Decode(_)));
    }

    #[test]
    fn non_positive_target_is_a_resize_error() {
        let png = one_pixel_png();
        assert!(matches!(
            normalize(&png, 0, 1277).unwrap_err(),
            CardError::Resize(_)
        ));
        assert!(matches!(
            normalize(&png, 1080, 0).unwrap_err(),
            CardError::Resize(_)
        ));
    }
}
