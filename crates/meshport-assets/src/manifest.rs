//! JSON model manifests
//!
//! A manifest is the serde image of [`Model`]: name, LODs, submeshes with
//! vertices/indices, and role-keyed texture references. Manifests stand in
//! for the proprietary binary model loader during development and testing;
//! the pipeline itself only ever sees the in-memory [`Model`].

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::debug;

use crate::error::ModelResult;
use crate::model::Model;

/// Load and validate a model manifest
pub fn load_model(path: impl AsRef<Path>) -> ModelResult<Model> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let model: Model = serde_json::from_reader(reader)?;
    model.validate()?;

    debug!(
        path = %path.display(),
        lods = model.lods.len(),
        vertices = model.vertex_count(),
        "loaded model manifest"
    );

    Ok(model)
}

/// Write a model as a pretty-printed manifest
pub fn save_model(model: &Model, path: impl AsRef<Path>) -> ModelResult<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, model)?;
    Ok(())
}
