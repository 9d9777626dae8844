//! Writes CML models to `.cml` files.

use super::renderer::CmlRenderer;
use discovery_application::ports::context_map_writer::{ContextMapWriter, WriteError, check_preconditions};
use discovery_domain::CmlModel;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-system [`ContextMapWriter`]; the file is always regenerated as a whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmlFileWriter {
    renderer: CmlRenderer,
}

impl CmlFileWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContextMapWriter for CmlFileWriter {
    fn write(&self, model: &CmlModel, destination: &Path) -> Result<PathBuf, WriteError> {
        check_preconditions(model, destination)?;

        let io_error = |source| WriteError::Io {
            path: destination.to_path_buf(),
            source,
        };
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let text = self.renderer.render(model);
        fs::write(destination, &text).map_err(io_error)?;

        debug!(path = %destination.display(), bytes = text.len(), "Wrote CML file");
        Ok(destination.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_domain::cml::CmlBoundedContext;
    use tempfile::TempDir;

    fn model() -> CmlModel {
        let mut model = CmlModel::default();
        model.context_map.contains.push("Insurance".to_string());
        model.bounded_contexts.push(CmlBoundedContext {
            name: "Insurance".to_string(),
            implementation_technology: None,
            aggregates: Vec::new(),
        });
        model
    }

    #[test]
    fn test_writes_file_and_creates_directories() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("src-gen/nested/insurance.cml");

        let written = CmlFileWriter::new().write(&model(), &destination).unwrap();
        assert_eq!(written, destination);
        let content = fs::read_to_string(&destination).unwrap();
        assert!(content.starts_with("ContextMap {\n\tcontains Insurance\n}"));
        assert!(content.contains("BoundedContext Insurance {"));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("map.cml");
        fs::write(&destination, "stale content").unwrap();

        CmlFileWriter::new().write(&model(), &destination).unwrap();
        assert!(!fs::read_to_string(&destination).unwrap().contains("stale"));
    }

    #[test]
    fn test_wrong_extension_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("out/map.txt");

        let err = CmlFileWriter::new().write(&model(), &destination).unwrap_err();
        assert!(matches!(err, WriteError::InvalidExtension(_)));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_empty_model_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("map.cml");

        let err = CmlFileWriter::new().write(&CmlModel::default(), &destination).unwrap_err();
        assert!(matches!(err, WriteError::EmptyModel));
        assert!(!destination.exists());
    }
}
