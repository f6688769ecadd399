//! Pure pixel transforms
//!
//! Every filter maps a borrowed [`PixelBuffer`] to a freshly allocated one;
//! decoded source buffers are never mutated in place.
//!
//! [`PixelBuffer`]: meshport_assets::PixelBuffer

mod blur;
mod composite;
mod height;

pub use blur::box_blur;
pub use composite::premultiply;
pub use height::derive_height;

/// Perceptual luminance of an RGBA pixel, normalized to 0..1
///
/// BT.601 weights 0.299/0.587/0.114; alpha is ignored.
pub fn luminance(pixel: [u8; 4]) -> f32 {
    let [r, g, b, _] = pixel;
    (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0
}
