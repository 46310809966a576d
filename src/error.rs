use thiserror::Error;

use crate::path::PropertyPath;

/// Fatal conditions found while walking a schema. Any of these aborts the
/// whole run; no partial declaration is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("unsupported shape at `{path}`: {shape}")]
    UnsupportedShape { path: PropertyPath, shape: String },

    #[error("invalid object pair at `{path}`: `object` can only be paired with `null`, found `{other}`")]
    InvalidObjectPair { path: PropertyPath, other: String },
}

impl GenerateError {
    pub fn path(&self) -> &PropertyPath {
        match self {
            GenerateError::UnsupportedShape { path, .. } => path,
            GenerateError::InvalidObjectPair { path, .. } => path,
        }
    }
}

/// The schema document itself could not be read into the model.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("at JSON path {path} → {message}")]
    Json { path: String, message: String },
}
