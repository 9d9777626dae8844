//! Context-map writer port.
//!
//! Persists a [`CmlModel`]. Adapters must call [`check_preconditions`] before
//! touching the destination.

use discovery_domain::CmlModel;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Required file extension of written context maps
pub const CML_EXTENSION: &str = "cml";

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("The CML file must end with the file extension '*.cml'! ({0})")]
    InvalidExtension(PathBuf),

    #[error("The Context Map must at least contain one Bounded Context to be serialized!")]
    EmptyModel,

    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    /// Precondition failures are detected before anything is written
    pub fn is_precondition(&self) -> bool {
        matches!(self, WriteError::InvalidExtension(_) | WriteError::EmptyModel)
    }
}

/// Reject destinations without the `.cml` extension and empty models.
pub fn check_preconditions(model: &CmlModel, destination: &Path) -> Result<(), WriteError> {
    let has_cml_extension = destination
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == CML_EXTENSION);
    if !has_cml_extension {
        return Err(WriteError::InvalidExtension(destination.to_path_buf()));
    }
    if model.bounded_contexts.is_empty() {
        return Err(WriteError::EmptyModel);
    }
    Ok(())
}

/// Port for persisting CML models
pub trait ContextMapWriter: Send + Sync {
    /// Write `model` to `destination`, returning the path written.
    fn write(&self, model: &CmlModel, destination: &Path) -> Result<PathBuf, WriteError>;
}
