//! Alpha compositing of the segmented foreground over a solid background

use crate::color::BackgroundColor;
use image::{ImageBuffer, Rgba, RgbaImage};

/// Composite `foreground` over a solid canvas of `background`
///
/// Standard "over" operator with alpha taken from the foreground:
/// `out = fg*a + bg*(1-a)` per channel, rounded. The canvas is fully
/// opaque, so the result's alpha channel is 255 everywhere. Output
/// dimensions equal the foreground's.
#[must_use]
pub fn composite_over_color(foreground: &RgbaImage, background: BackgroundColor) -> RgbaImage {
    let (width, height) = foreground.dimensions();
    let bg = background.to_rgba().0;
    let mut result = ImageBuffer::new(width, height);

    for (x, y, pixel) in foreground.enumerate_pixels() {
        let alpha = u32::from(pixel[3]);
        let inv = 255 - alpha;

        let blend = |fg: u8, bg: u8| -> u8 {
            // Rounded integer blend; exact at alpha 0 and 255.
            ((u32::from(fg) * alpha + u32::from(bg) * inv + 127) / 255) as u8
        };

        result.put_pixel(
            x,
            y,
            Rgba([
                blend(pixel[0], bg[0]),
                blend(pixel[1], bg[1]),
                blend(pixel[2], bg[2]),
                255,
            ]),
        );
    }

    result
}
