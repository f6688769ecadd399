// crates/meshport-assets/src/model.rs
//! Rigid model data structures

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::material::MaterialRef;

/// A rigid model: ordered levels of detail, each a group of submeshes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Model name
    pub name: String,
    /// Levels of detail, most detailed first
    pub lods: Vec<Lod>,
}

impl Model {
    /// Create a new empty model
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lods: Vec::new(),
        }
    }

    /// Get the most detailed LOD, if any
    pub fn first_lod(&self) -> Option<&Lod> {
        self.lods.first()
    }

    /// Total vertex count across all LODs
    pub fn vertex_count(&self) -> usize {
        self.lods.iter().map(Lod::vertex_count).sum()
    }

    /// Total triangle count across all LODs
    pub fn triangle_count(&self) -> usize {
        self.lods.iter().map(Lod::triangle_count).sum()
    }

    /// Check structural invariants on every submesh
    ///
    /// A valid model has at least one LOD, every submesh has an index count
    /// divisible by 3, and every index points at an existing vertex.
    pub fn validate(&self) -> ModelResult<()> {
        if self.lods.is_empty() {
            return Err(ModelError::EmptyModel);
        }
        for lod in &self.lods {
            for submesh in &lod.submeshes {
                submesh.validate()?;
            }
        }
        Ok(())
    }
}

/// One level of detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lod {
    /// Submeshes drawn at this detail level
    pub submeshes: Vec<Submesh>,
}

impl Lod {
    /// Vertex count across all submeshes
    pub fn vertex_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.vertices.len()).sum()
    }

    /// Triangle count across all submeshes
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(Submesh::triangle_count).sum()
    }
}

/// An indexed triangle list with a single material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submesh {
    /// Submesh name
    pub name: String,
    /// All vertices
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`, three per face
    pub indices: Vec<u32>,
    /// Material applied to every face
    pub material: MaterialRef,
}

impl Submesh {
    /// Create a new empty submesh
    pub fn new(name: impl Into<String>, material: MaterialRef) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            indices: Vec::new(),
            material,
        }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check index invariants
    pub fn validate(&self) -> ModelResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(ModelError::InvalidGeometry {
                submesh: self.name.clone(),
                message: format!("index count {} is not a multiple of 3", self.indices.len()),
            });
        }
        for &index in &self.indices {
            if index as usize >= self.vertices.len() {
                return Err(ModelError::InvalidGeometry {
                    submesh: self.name.clone(),
                    message: format!(
                        "index {} out of range ({} vertices)",
                        index,
                        self.vertices.len()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// A single vertex
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// UV coordinates
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a vertex with just position
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        }
    }
}
