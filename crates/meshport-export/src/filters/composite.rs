//! Premultiplied-alpha compositing

use meshport_assets::PixelBuffer;

use super::luminance;

/// Premultiply a color map by a mask's luminance
///
/// The output covers the overlap of the two buffers: mismatched sizes are
/// cropped to `min(width)` x `min(height)`, never scaled. Per pixel the
/// mask's luminance becomes the alpha channel and scales R/G/B.
pub fn premultiply(color: &PixelBuffer, mask: &PixelBuffer) -> PixelBuffer {
    let width = color.width().min(mask.width());
    let height = color.height().min(mask.height());
    let mut out = PixelBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let src = color.pixel(x, y);
            let alpha = luminance(mask.pixel(x, y));
            let scale = |channel: u8| (f32::from(channel) * alpha).round() as u8;

            out.set_pixel(
                x,
                y,
                [
                    scale(src[0]),
                    scale(src[1]),
                    scale(src[2]),
                    (alpha * 255.0).round() as u8,
                ],
            );
        }
    }

    out
}
