//! Texture decoding seam
//!
//! The export pipeline never reads image files directly; it asks a
//! [`TextureDecoder`] to turn an opaque [`TextureRef`] into pixels. The
//! bundled [`FileTextureDecoder`] resolves references against a root
//! directory and decodes common interchange formats (PNG, TGA, BMP, JPEG)
//! through the `image` crate. Proprietary compressed formats live behind
//! other implementations of the same trait.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{TextureError, TextureResult};
use crate::material::TextureRef;
use crate::pixel::PixelBuffer;

/// Resolves texture references to raw RGBA8 pixels
pub trait TextureDecoder {
    /// Decode one texture
    fn decode(&self, texture: &TextureRef) -> TextureResult<PixelBuffer>;
}

/// File-system decoder backed by the `image` crate
pub struct FileTextureDecoder {
    root: PathBuf,
}

impl FileTextureDecoder {
    /// Create a decoder resolving relative references against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, texture: &TextureRef) -> PathBuf {
        let path = Path::new(texture.as_str());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl TextureDecoder for FileTextureDecoder {
    fn decode(&self, texture: &TextureRef) -> TextureResult<PixelBuffer> {
        let path = self.resolve(texture);
        let img = image::open(&path)?.into_rgba8();
        let (width, height) = img.dimensions();

        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimensions { width, height });
        }

        debug!(path = %path.display(), width, height, "decoded texture");

        PixelBuffer::from_raw(width, height, img.into_raw()).ok_or_else(|| {
            TextureError::Decode(format!("pixel data does not match {}x{}", width, height))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_decode_png_from_root() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(2, 3, Rgba([10, 20, 30, 255]));
        img.save(dir.path().join("swatch.png")).unwrap();

        let decoder = FileTextureDecoder::new(dir.path());
        let pixels = decoder.decode(&TextureRef::new("swatch.png")).unwrap();

        assert_eq!(pixels.width(), 2);
        assert_eq!(pixels.height(), 3);
        assert_eq!(pixels.pixel(1, 2), [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_absolute_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swatch.png");
        RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let decoder = FileTextureDecoder::new("/nonexistent-root");
        let reference = TextureRef::new(path.to_string_lossy().to_string());

        assert!(decoder.decode(&reference).is_ok());
    }

    #[test]
    fn test_decode_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let decoder = FileTextureDecoder::new(dir.path());

        assert!(decoder.decode(&TextureRef::new("missing.png")).is_err());
    }
}
