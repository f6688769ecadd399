//! meshport-assets
//!
//! In-memory asset types for the meshport export pipeline: indexed triangle
//! models grouped by level of detail, material definitions with role-tagged
//! texture references, raw RGBA8 pixel buffers, and the decoding seam that
//! turns texture references into pixels.
//!
//! # Example
//!
//! ```rust,ignore
//! use meshport_assets::{manifest, FileTextureDecoder, TextureDecoder};
//!
//! let model = manifest::load_model("crate_box.json")?;
//! let decoder = FileTextureDecoder::new("textures/");
//!
//! for submesh in &model.lods[0].submeshes {
//!     println!("{}: {} triangles", submesh.name, submesh.triangle_count());
//! }
//! ```

pub mod error;
pub mod manifest;
pub mod material;
pub mod model;
pub mod pixel;
pub mod texture;

// Re-export main types
pub use error::{ModelError, ModelResult, TextureError, TextureResult};
pub use material::{MaterialRef, TextureRef, TextureRole};
pub use model::{Lod, Model, Submesh, Vertex};
pub use pixel::PixelBuffer;
pub use texture::{FileTextureDecoder, TextureDecoder};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
