//! Error types for asset loading and texture decoding

use thiserror::Error;

/// Errors raised while loading or validating a model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid geometry in submesh '{submesh}': {message}")]
    InvalidGeometry { submesh: String, message: String },

    #[error("Model has no level of detail")]
    EmptyModel,
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while decoding or re-encoding textures
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type TextureResult<T> = Result<T, TextureError>;
