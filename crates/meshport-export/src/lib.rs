//! meshport export pipeline
//!
//! Converts parsed rigid models to interchange formats:
//! - Wavefront OBJ geometry (one index space across all submeshes)
//! - MTL material blocks with derived texture references
//! - Height maps reconstructed from normal maps, premultiplied diffuse
//!   maps, and canonical 32-bit RGBA PNG output for every raster

pub mod filters;
pub mod mtl;
pub mod normalize;
pub mod obj;
pub mod pipeline;

pub use mtl::{MaterialMaps, TextureFailure};
pub use pipeline::{ExportError, ExportOptions, ExportResult, ExportSummary, ModelExporter};
