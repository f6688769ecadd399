//! Separable box blur

use meshport_assets::PixelBuffer;

/// Box-blur a buffer with the given radius
///
/// Separable: one horizontal pass, then one vertical pass over its result.
/// Windows are clipped at the edges and divided by the number of samples
/// actually taken; there is no wraparound. `radius == 0` returns a copy of
/// the input.
pub fn box_blur(buffer: &PixelBuffer, radius: u32) -> PixelBuffer {
    if radius == 0 {
        return buffer.clone();
    }

    let horizontal = blur_pass(buffer, radius, Axis::Horizontal);
    blur_pass(&horizontal, radius, Axis::Vertical)
}

#[derive(Clone, Copy, PartialEq)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_pass(src: &PixelBuffer, radius: u32, axis: Axis) -> PixelBuffer {
    let width = src.width();
    let height = src.height();
    let mut out = PixelBuffer::new(width, height);

    let radius = i64::from(radius);
    let limit = i64::from(if axis == Axis::Horizontal { width } else { height });

    for y in 0..height {
        for x in 0..width {
            let center = i64::from(if axis == Axis::Horizontal { x } else { y });

            let mut sum = [0u32; 4];
            let mut count = 0u32;

            for offset in -radius..=radius {
                let pos = center + offset;
                if pos < 0 || pos >= limit {
                    continue;
                }
                let sample = match axis {
                    Axis::Horizontal => src.pixel(pos as u32, y),
                    Axis::Vertical => src.pixel(x, pos as u32),
                };
                for (acc, channel) in sum.iter_mut().zip(sample) {
                    *acc += u32::from(channel);
                }
                count += 1;
            }

            let mut averaged = [0u8; 4];
            for (dst, acc) in averaged.iter_mut().zip(sum) {
                *dst = (acc as f32 / count as f32).round() as u8;
            }
            out.set_pixel(x, y, averaged);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(levels: &[u8]) -> PixelBuffer {
        let mut buf = PixelBuffer::new(levels.len() as u32, 1);
        for (x, &level) in levels.iter().enumerate() {
            buf.set_pixel(x as u32, 0, [level, level, level, 255]);
        }
        buf
    }

    #[test]
    fn test_radius_zero_is_identity() {
        let buf = row(&[0, 90, 255, 13]);
        let blurred = box_blur(&buf, 0);
        assert_eq!(blurred, buf);
    }

    #[test]
    fn test_uniform_buffer_is_unchanged() {
        let mut buf = PixelBuffer::new(5, 4);
        for y in 0..4 {
            for x in 0..5 {
                buf.set_pixel(x, y, [70, 70, 70, 255]);
            }
        }

        for radius in [1, 2, 3] {
            assert_eq!(box_blur(&buf, radius), buf);
        }
    }

    #[test]
    fn test_edges_average_over_clipped_window() {
        // Horizontal radius-1 over a 3x1 row; the 1-pixel vertical pass is
        // the identity. Edge pixels average two samples, the middle three.
        let blurred = box_blur(&row(&[0, 90, 255]), 1);

        assert_eq!(blurred.pixel(0, 0)[0], 45); // (0 + 90) / 2
        assert_eq!(blurred.pixel(1, 0)[0], 115); // (0 + 90 + 255) / 3
        assert_eq!(blurred.pixel(2, 0)[0], 173); // (90 + 255) / 2, rounded
    }

    #[test]
    fn test_vertical_pass_mirrors_horizontal() {
        let mut column = PixelBuffer::new(1, 3);
        for (y, level) in [0u8, 90, 255].into_iter().enumerate() {
            column.set_pixel(0, y as u32, [level, level, level, 255]);
        }

        let blurred = box_blur(&column, 1);
        assert_eq!(blurred.pixel(0, 0)[0], 45);
        assert_eq!(blurred.pixel(0, 1)[0], 115);
        assert_eq!(blurred.pixel(0, 2)[0], 173);
    }

    #[test]
    fn test_alpha_is_averaged_like_color() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.set_pixel(0, 0, [0, 0, 0, 0]);
        buf.set_pixel(1, 0, [0, 0, 0, 255]);

        let blurred = box_blur(&buf, 1);
        assert_eq!(blurred.pixel(0, 0)[3], 128);
        assert_eq!(blurred.pixel(1, 0)[3], 128);
    }

    #[test]
    fn test_radius_larger_than_buffer_flattens_it() {
        let blurred = box_blur(&row(&[0, 255]), 10);
        assert_eq!(blurred.pixel(0, 0)[0], 128);
        assert_eq!(blurred.pixel(1, 0)[0], 128);
    }
}
