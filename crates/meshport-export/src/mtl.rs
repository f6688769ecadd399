//! MTL material blocks and derived texture maps
//!
//! Per material this module decodes the role-tagged source textures, runs
//! the derivation filters (height from normal, premultiplied diffuse from
//! mask), writes the results as normalized PNGs next to the mesh file, and
//! emits the material block referencing them. Texture processing failures
//! are explicit outcomes: each is logged and recorded, the affected map
//! reference is omitted, and the export carries on.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use meshport_assets::{
    MaterialRef, PixelBuffer, TextureDecoder, TextureError, TextureRef, TextureResult, TextureRole,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::filters::{box_blur, derive_height, premultiply};
use crate::normalize::normalize_image;
use crate::pipeline::ExportOptions;

/// File references produced for one material
#[derive(Debug, Default, Clone)]
pub struct MaterialMaps {
    /// `map_bump` target
    pub bump: Option<String>,
    /// `disp` target
    pub displacement: Option<String>,
    /// `map_Kd` target
    pub diffuse: Option<String>,
    /// Decoded mask written alongside; not referenced by the block
    pub mask: Option<String>,
}

impl MaterialMaps {
    /// Number of texture files written for this material
    pub fn written_count(&self) -> usize {
        [&self.bump, &self.displacement, &self.diffuse, &self.mask]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}

/// A recoverable per-texture failure
#[derive(Debug, Clone, Serialize)]
pub struct TextureFailure {
    /// Material the texture belonged to
    pub material: String,
    /// Role of the failed texture
    pub role: TextureRole,
    /// Failure description
    pub message: String,
}

/// Derive and write a material's textures into `output_dir`
///
/// Each texture is processed independently. Failures never propagate out;
/// they are logged, returned for the summary, and leave the corresponding
/// map reference empty.
pub fn derive_textures<D: TextureDecoder>(
    decoder: &D,
    material: &MaterialRef,
    output_dir: &Path,
    options: &ExportOptions,
) -> (MaterialMaps, Vec<TextureFailure>) {
    let mut maps = MaterialMaps::default();
    let mut failures = Vec::new();

    if let Some(reference) = material.texture(TextureRole::Normal) {
        match process_normal(decoder, &material.name, reference, output_dir, options) {
            Ok((bump, displacement)) => {
                maps.bump = Some(bump);
                maps.displacement = Some(displacement);
            }
            Err(e) => record_failure(&mut failures, material, TextureRole::Normal, &e),
        }
    }

    if let Some((color_role, reference)) = material.color_slot() {
        match decoder.decode(reference) {
            Ok(mut color) => {
                // Losing the mask degrades to an unmasked diffuse.
                if let Some((mask_role, mask_ref)) = material.mask_slot() {
                    match process_mask(decoder, &material.name, mask_ref, output_dir) {
                        Ok((mask_name, mask)) => {
                            color = premultiply(&color, &mask);
                            maps.mask = Some(mask_name);
                        }
                        Err(e) => record_failure(&mut failures, material, mask_role, &e),
                    }
                }

                let premultiplied = maps.mask.is_some();
                match write_color(&color, &material.name, output_dir, premultiplied) {
                    Ok(diffuse) => maps.diffuse = Some(diffuse),
                    Err(e) => record_failure(&mut failures, material, color_role, &e),
                }
            }
            Err(e) => record_failure(&mut failures, material, color_role, &e),
        }
    }

    (maps, failures)
}

/// Write one material block
///
/// Fixed reflectance constants first, then whichever map references were
/// derived. The diffuse factor stays white so the texture carries all the
/// color information.
pub fn write_material<W: Write>(
    out: &mut W,
    material: &MaterialRef,
    maps: &MaterialMaps,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "newmtl {}", material.export_name())?;
    writeln!(out, "Ka 1.000000 1.000000 1.000000")?;
    writeln!(out, "Kd 1.000000 1.000000 1.000000")?;
    writeln!(out, "Ks 0.000000 0.000000 0.000000")?;
    writeln!(out, "Ns 10.000000")?;
    writeln!(out, "illum 2")?;

    if let Some(bump) = &maps.bump {
        writeln!(out, "map_bump {}", bump)?;
    }
    if let Some(displacement) = &maps.displacement {
        writeln!(out, "disp {}", displacement)?;
    }
    if let Some(diffuse) = &maps.diffuse {
        writeln!(out, "map_Kd {}", diffuse)?;
    }

    Ok(())
}

/// Write the material file's comment header
pub fn write_header<W: Write>(out: &mut W, model_name: &str) -> io::Result<()> {
    writeln!(out, "# Exported by meshport")?;
    writeln!(out, "# Materials for model: {}", model_name)?;
    Ok(())
}

fn record_failure(
    failures: &mut Vec<TextureFailure>,
    material: &MaterialRef,
    role: TextureRole,
    error: &TextureError,
) {
    warn!(
        material = %material.name,
        role = role.name(),
        error = %error,
        "texture skipped"
    );
    failures.push(TextureFailure {
        material: material.name.clone(),
        role,
        message: error.to_string(),
    });
}

/// Decode a normal map, write it and its derived height map
fn process_normal<D: TextureDecoder>(
    decoder: &D,
    material_name: &str,
    reference: &TextureRef,
    output_dir: &Path,
    options: &ExportOptions,
) -> TextureResult<(String, String)> {
    let pixels = decoder.decode(reference)?;

    let normal_name = format!("{}_normal.png", material_name);
    write_texture(&pixels, &output_dir.join(&normal_name))?;

    let mut height = derive_height(&pixels, options.height_strength, options.height_contrast);
    if options.blur_radius > 0 {
        height = box_blur(&height, options.blur_radius);
    }

    let displacement_name = format!("{}_displacement.png", material_name);
    write_texture(&height, &output_dir.join(&displacement_name))?;

    Ok((normal_name, displacement_name))
}

/// Decode a mask and write it alongside the other maps
fn process_mask<D: TextureDecoder>(
    decoder: &D,
    material_name: &str,
    reference: &TextureRef,
    output_dir: &Path,
) -> TextureResult<(String, PixelBuffer)> {
    let pixels = decoder.decode(reference)?;

    let mask_name = format!("{}_mask.png", material_name);
    write_texture(&pixels, &output_dir.join(&mask_name))?;

    Ok((mask_name, pixels))
}

/// Write the diffuse output
///
/// A premultiplied result is staged under the `_premult` name and renamed
/// over the `_diffuse` slot once normalized, so the intermediate never
/// outlives the material.
fn write_color(
    color: &PixelBuffer,
    material_name: &str,
    output_dir: &Path,
    premultiplied: bool,
) -> TextureResult<String> {
    let diffuse_name = format!("{}_diffuse.png", material_name);
    let diffuse_path = output_dir.join(&diffuse_name);

    if premultiplied {
        let staged = output_dir.join(format!("{}_premult.png", material_name));
        write_texture(color, &staged)?;
        fs::rename(&staged, &diffuse_path)?;
    } else {
        write_texture(color, &diffuse_path)?;
    }

    Ok(diffuse_name)
}

/// Save a pixel buffer as PNG and normalize it in place
///
/// Normalization failures are non-fatal: the file keeps whatever encoding
/// the save produced.
fn write_texture(pixels: &PixelBuffer, path: &Path) -> TextureResult<()> {
    let (width, height) = (pixels.width(), pixels.height());
    let img = RgbaImage::from_raw(width, height, pixels.data().to_vec())
        .ok_or(TextureError::InvalidDimensions { width, height })?;

    DynamicImage::ImageRgba8(img).save_with_format(path, ImageFormat::Png)?;

    if let Err(e) = normalize_image(path) {
        debug!(path = %path.display(), error = %e, "normalization failed, keeping original encoding");
    }

    Ok(())
}
