//! Deployment-topology reader port

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A declared "service depends on service" pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceDependency {
    /// The dependent (downstream) service
    pub service: String,
    /// The service depended upon (upstream)
    pub depends_on: String,
}

impl ServiceDependency {
    pub fn new(service: impl Into<String>, depends_on: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            depends_on: depends_on.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum TopologyReadError {
    #[error("Topology source directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("Could not read topology descriptor {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse topology descriptor {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Port for reading service dependencies from deployment descriptors
pub trait TopologyReader: Send + Sync {
    /// All dependency pairs declared below `directory`, in a stable order.
    fn read_dependencies(&self, directory: &Path) -> Result<Vec<ServiceDependency>, TopologyReadError>;
}
