use ab_glyph::PxScale;
use imageproc::drawing::text_size;

use crate::error::{CardError, CardResult};
use crate::font::FontHandle;
use crate::model::PlacementDirective;

/// A directive resolved to its pixel origin on the canvas.
#[derive(Clone, Debug)]
pub struct PositionedRun {
    pub directive: PlacementDirective,
    pub x: i32,
    pub y: i32,
}

/// Font-metric text measurement.
///
/// Positioning always works from a measured pixel extent, never from a
/// character count. The trait seam exists so layout rules stay testable
/// with synthetic metrics.
pub trait TextMeasure {
    fn line_width(&self, size: f32, text: &str) -> CardResult<u32>;
}

impl TextMeasure for FontHandle {
    fn line_width(&self, size: f32, text: &str) -> CardResult<u32> {
        let (width, _) = text_size(PxScale::from(size), self.font(), text);
        Ok(width)
    }
}

/// Computes the pixel origin of one directive.
pub fn place<M: TextMeasure>(
    canvas_w: u32,
    canvas_h: u32,
    directive: &PlacementDirective,
    measure: &M,
) -> CardResult<(i32, i32)> {
    if directive.size.is_nan() || directive.size <= 0.0 {
        return Err(CardError::measurement(format!(
            "font size must be positive, got {}",
            directive.size
        )));
    }
    let text_w = measure.line_width(directive.size, &directive.text)?;
    let x = directive.h.resolve(canvas_w, text_w);
    let y = directive.v.resolve(canvas_h, directive.size);
    Ok((x, y))
}

/// Resolves every directive in order, preserving paint order.
pub fn layout_all<M: TextMeasure>(
    canvas_w: u32,
    canvas_h: u32,
    directives: &[PlacementDirective],
    measure: &M,
) -> CardResult<Vec<PositionedRun>> {
    directives
        .iter()
        .map(|directive| {
            let (x, y) = place(canvas_w, canvas_h, directive, measure)?;
            Ok(PositionedRun {
                directive: directive.clone(),
                x,
                y,
            })
        })
        .collect()
}

/// Splits an overlong run after `threshold` characters.
///
/// Returns the head and, when the text exceeds the threshold, the tail;
/// concatenating the two always reproduces the input exactly.
pub fn split_overflow(text: &str, threshold: usize) -> (&str, Option<&str>) {
    match text.char_indices().nth(threshold) {
        Some((idx, _)) => (&text[..idx], Some(&text[idx..])),
        None => (text, None),
    }
}
