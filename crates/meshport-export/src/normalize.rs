//! Canonical image normalization
//!
//! Every raster the pipeline emits ends up as a 32-bit RGBA PNG, whatever
//! encoding the intermediate write produced. The re-encode is staged in
//! memory and only replaces the file once it succeeds, so a failed
//! normalization leaves the original encoding on disk.

use std::fs;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use meshport_assets::TextureResult;
use tracing::debug;

/// Re-encode the image at `path` as 32-bit RGBA PNG, in place
pub fn normalize_image(path: &Path) -> TextureResult<()> {
    let img = image::open(path)?.into_rgba8();
    let (width, height) = img.dimensions();

    let mut encoded = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        &mut encoded,
        CompressionType::Best,
        FilterType::Adaptive,
    );
    encoder.write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)?;

    fs::write(path, &encoded)?;
    debug!(path = %path.display(), width, height, "normalized image");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_rgb_png_becomes_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        normalize_image(&path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!(reloaded.color(), image::ColorType::Rgba8);
        assert_eq!(reloaded.to_rgba8().get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_rgba_pixels_survive_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");

        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 128]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 7]));
        img.save(&path).unwrap();

        normalize_image(&path).unwrap();

        let reloaded = image::open(&path).unwrap().into_rgba8();
        assert_eq!(reloaded.get_pixel(0, 0), &Rgba([255, 0, 0, 128]));
        assert_eq!(reloaded.get_pixel(1, 0), &Rgba([0, 255, 0, 7]));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twice.png");
        RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 4]))
            .save(&path)
            .unwrap();

        normalize_image(&path).unwrap();
        let first = std::fs::read(&path).unwrap();

        normalize_image(&path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_file_fails_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");

        assert!(normalize_image(&path).is_err());
        assert!(!path.exists());
    }
}
