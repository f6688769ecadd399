//! Model export pipeline
//!
//! Drives a full export: validates the model, emits OBJ geometry for the
//! most detailed LOD under a running vertex offset, derives and writes each
//! unique material's textures, then lands both output files.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use meshport_assets::{Model, ModelError, TextureDecoder};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::mtl::{self, TextureFailure};
use crate::obj;

/// Export pipeline errors
///
/// Only model-source and output-file problems surface here. Per-texture
/// failures are collected in the summary instead.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Model failed to load or validate
    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),

    /// An output file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Texture derivation options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Weight of the normal map luminance in the derived height
    pub height_strength: f32,
    /// Contrast reshaping applied to derived heights, 0 disables
    pub height_contrast: f32,
    /// Box blur radius for the displacement map, 0 disables
    pub blur_radius: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            height_strength: 0.5,
            height_contrast: 0.0,
            blur_radius: 0,
        }
    }
}

/// What an export produced
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Submeshes written to the OBJ file
    pub submeshes: usize,
    /// Vertices written
    pub vertices: usize,
    /// Triangles written
    pub triangles: usize,
    /// Unique materials in the MTL file
    pub materials: usize,
    /// Texture files written next to the mesh
    pub textures_written: usize,
    /// Textures skipped, with the reason each was dropped
    pub texture_failures: Vec<TextureFailure>,
}

/// Output naming and the running vertex index offset for one export
struct ExportContext {
    output_dir: PathBuf,
    base_name: String,
    vertex_offset: usize,
}

impl ExportContext {
    fn new(output_dir: &Path, base_name: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            base_name: base_name.to_string(),
            vertex_offset: 0,
        }
    }

    fn vertex_offset(&self) -> usize {
        self.vertex_offset
    }

    fn advance_vertices(&mut self, written: usize) {
        self.vertex_offset += written;
    }

    fn mesh_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.obj", self.base_name))
    }

    fn material_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.mtl", self.base_name))
    }

    fn material_file_name(&self) -> String {
        format!("{}.mtl", self.base_name)
    }
}

/// OBJ/MTL model exporter
pub struct ModelExporter<D> {
    decoder: D,
    options: ExportOptions,
}

impl<D: TextureDecoder> ModelExporter<D> {
    /// Create an exporter with default texture options
    pub fn new(decoder: D) -> Self {
        Self::with_options(decoder, ExportOptions::default())
    }

    /// Create an exporter with explicit texture options
    pub fn with_options(decoder: D, options: ExportOptions) -> Self {
        Self { decoder, options }
    }

    /// Export `model` as `<base_name>.obj` plus `<base_name>.mtl` in `output_dir`
    ///
    /// Only the most detailed LOD is exported. Geometry and material
    /// records are built in memory and written out last, after all texture
    /// derivation has settled.
    pub fn export(
        &self,
        model: &Model,
        output_dir: impl AsRef<Path>,
        base_name: &str,
    ) -> ExportResult<ExportSummary> {
        let output_dir = output_dir.as_ref();

        model.validate()?;
        let lod = model.first_lod().ok_or(ModelError::EmptyModel)?;

        fs::create_dir_all(output_dir).map_err(|source| ExportError::OutputWrite {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut context = ExportContext::new(output_dir, base_name);
        let mut geometry: Vec<u8> = Vec::new();
        let mut materials: Vec<u8> = Vec::new();

        obj::write_header(
            &mut geometry,
            &model.name,
            &context.material_file_name(),
            lod.vertex_count(),
            lod.triangle_count(),
        )?;
        mtl::write_header(&mut materials, &model.name)?;

        let mut seen_materials: HashSet<String> = HashSet::new();
        let mut textures_written = 0;
        let mut texture_failures = Vec::new();

        for submesh in &lod.submeshes {
            debug!(
                submesh = %submesh.name,
                vertices = submesh.vertex_count(),
                offset = context.vertex_offset(),
                "writing geometry"
            );
            let written = obj::write_submesh(&mut geometry, submesh, context.vertex_offset())?;
            context.advance_vertices(written);

            // Shared materials get one block; every submesh still names it.
            if seen_materials.insert(submesh.material.name.clone()) {
                let (maps, failures) = mtl::derive_textures(
                    &self.decoder,
                    &submesh.material,
                    output_dir,
                    &self.options,
                );
                textures_written += maps.written_count();
                texture_failures.extend(failures);
                mtl::write_material(&mut materials, &submesh.material, &maps)?;
            }
        }

        write_output(&context.mesh_path(), &geometry)?;
        write_output(&context.material_path(), &materials)?;

        let summary = ExportSummary {
            submeshes: lod.submeshes.len(),
            vertices: context.vertex_offset(),
            triangles: lod.triangle_count(),
            materials: seen_materials.len(),
            textures_written,
            texture_failures,
        };

        info!(
            model = %model.name,
            submeshes = summary.submeshes,
            vertices = summary.vertices,
            materials = summary.materials,
            failures = summary.texture_failures.len(),
            "export complete"
        );

        Ok(summary)
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    fs::write(path, bytes).map_err(|source| ExportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
