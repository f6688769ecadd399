//! Height reconstruction from normal maps

use meshport_assets::PixelBuffer;

use super::luminance;

/// Contrast magnitudes below this leave the curve linear.
const CONTRAST_EPSILON: f32 = 1e-3;

/// Derive a greyscale height map from a normal map
///
/// Per pixel: luminance is remapped around the 0.5 midpoint by `strength`
/// (`h = (lum - 0.5) * strength + 0.5`), reshaped by `contrast` when one is
/// set (`h = 0.5 + (h - 0.5) * (1 + contrast)`), clamped to 0..1 and
/// replicated across R/G/B. Alpha passes through unchanged. A luminance
/// proxy, not a slope integration.
pub fn derive_height(normal_map: &PixelBuffer, strength: f32, contrast: f32) -> PixelBuffer {
    let mut out = PixelBuffer::new(normal_map.width(), normal_map.height());

    for y in 0..normal_map.height() {
        for x in 0..normal_map.width() {
            let src = normal_map.pixel(x, y);

            let mut h = (luminance(src) - 0.5) * strength + 0.5;
            if contrast.abs() >= CONTRAST_EPSILON {
                h = 0.5 + (h - 0.5) * (1.0 + contrast);
            }

            let level = (h.clamp(0.0, 1.0) * 255.0).round() as u8;
            out.set_pixel(x, y, [level, level, level, src[3]]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgba: [u8; 4]) -> PixelBuffer {
        let mut buf = PixelBuffer::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                buf.set_pixel(x, y, rgba);
            }
        }
        buf
    }

    fn level_of(buf: &PixelBuffer) -> u8 {
        buf.pixel(0, 0)[0]
    }

    #[test]
    fn test_midpoint_grey_is_a_fixed_point() {
        // Luminance of (128,128,128) sits at ~0.502; any strength keeps it
        // near the midpoint.
        for strength in [0.0, 0.5, 1.0, 3.0] {
            let height = derive_height(&solid([128, 128, 128, 255]), strength, 0.0);
            let level = level_of(&height);
            assert!((127..=130).contains(&level), "strength {}: {}", strength, level);
        }
    }

    #[test]
    fn test_strength_is_monotonic_until_clamp() {
        let bright = solid([220, 220, 220, 255]);

        let mut last = 0;
        for strength in [0.1, 0.3, 0.5, 0.8, 1.0, 2.0, 5.0] {
            let level = level_of(&derive_height(&bright, strength, 0.0));
            assert!(level >= last, "strength {} regressed: {} < {}", strength, level, last);
            last = level;
        }
        assert_eq!(last, 255);
    }

    #[test]
    fn test_contrast_spreads_around_midpoint() {
        let bright = solid([200, 200, 200, 255]);

        let flat = level_of(&derive_height(&bright, 0.5, 0.0));
        let pushed = level_of(&derive_height(&bright, 0.5, 1.0));

        // lum ~0.784 -> h ~0.642 -> contrast 1.0 doubles the distance from
        // the midpoint to ~0.784.
        assert!(pushed > flat);
        assert_eq!(flat, 164);
        assert_eq!(pushed, 200);
    }

    #[test]
    fn test_negligible_contrast_leaves_curve_linear() {
        let bright = solid([200, 200, 200, 255]);

        let zero = level_of(&derive_height(&bright, 0.5, 0.0));
        let tiny = level_of(&derive_height(&bright, 0.5, 0.0005));
        assert_eq!(zero, tiny);
    }

    #[test]
    fn test_output_is_clamped_greyscale() {
        let white = solid([255, 255, 255, 255]);
        let height = derive_height(&white, 10.0, 0.0);

        let px = height.pixel(1, 1);
        assert_eq!(px, [255, 255, 255, 255]);

        let black = solid([0, 0, 0, 255]);
        let height = derive_height(&black, 10.0, 0.0);
        assert_eq!(height.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_alpha_passes_through() {
        let translucent = solid([90, 90, 90, 42]);
        let height = derive_height(&translucent, 0.5, 0.0);

        assert_eq!(height.pixel(0, 1)[3], 42);
    }
}
