//! docker-compose topology reader.
//!
//! Finds every `docker-compose.yml`/`docker-compose.yaml` below a directory
//! and reports the `depends_on` declarations of its services. Both the list
//! form and the map form (service → condition) of `depends_on` are read.

use discovery_application::ports::topology_reader::{ServiceDependency, TopologyReadError, TopologyReader};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const COMPOSE_FILE_NAMES: [&str; 2] = ["docker-compose.yml", "docker-compose.yaml"];

#[derive(Debug, Default, Deserialize)]
struct ComposeDocument {
    #[serde(default)]
    services: Option<Mapping>,
}

#[derive(Debug, Default, Deserialize)]
struct ComposeService {
    #[serde(default)]
    depends_on: Option<DependsOn>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DependsOn {
    List(Vec<String>),
    Map(Mapping),
}

impl DependsOn {
    fn services(&self) -> Vec<String> {
        match self {
            DependsOn::List(services) => services.clone(),
            DependsOn::Map(services) => services
                .keys()
                .filter_map(|key| key.as_str().map(str::to_string))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DockerComposeReader;

impl DockerComposeReader {
    pub fn new() -> Self {
        Self
    }

    /// All compose files below `directory`, sorted by path
    pub fn find_compose_files(&self, directory: &Path) -> Result<Vec<PathBuf>, TopologyReadError> {
        if !directory.is_dir() {
            return Err(TopologyReadError::MissingDirectory(directory.to_path_buf()));
        }

        let base = glob::Pattern::escape(&directory.to_string_lossy());
        let mut files = Vec::new();
        for name in COMPOSE_FILE_NAMES {
            let pattern = format!("{base}/**/{name}");
            let entries = glob::glob(&pattern).map_err(|e| TopologyReadError::Parse {
                path: directory.to_path_buf(),
                message: e.to_string(),
            })?;
            for entry in entries {
                let path = entry.map_err(|e| TopologyReadError::Io {
                    path: e.path().to_path_buf(),
                    source: e.into_error(),
                })?;
                files.push(path);
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Dependency pairs declared in one compose file
    pub fn read_file(&self, path: &Path) -> Result<Vec<ServiceDependency>, TopologyReadError> {
        let text = fs::read_to_string(path).map_err(|source| TopologyReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_dependencies(&text).map_err(|message| TopologyReadError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }
}

impl TopologyReader for DockerComposeReader {
    fn read_dependencies(&self, directory: &Path) -> Result<Vec<ServiceDependency>, TopologyReadError> {
        let mut dependencies = Vec::new();
        for file in self.find_compose_files(directory)? {
            let declared = self.read_file(&file)?;
            debug!(file = %file.display(), dependencies = declared.len(), "Read docker-compose file");
            dependencies.extend(declared);
        }
        Ok(dependencies)
    }
}

/// Parse the `depends_on` pairs of a compose document. A document without
/// `services` declares no pairs.
pub fn parse_dependencies(text: &str) -> Result<Vec<ServiceDependency>, String> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let document: ComposeDocument = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    let Some(services) = document.services else {
        return Ok(Vec::new());
    };

    let mut dependencies = Vec::new();
    for (name, definition) in &services {
        let Some(service) = name.as_str() else {
            continue;
        };
        if definition.is_null() {
            continue;
        }
        let definition: ComposeService = serde_yaml::from_value(Value::clone(definition))
            .map_err(|e| format!("service '{service}': {e}"))?;
        if let Some(depends_on) = definition.depends_on {
            dependencies.extend(
                depends_on
                    .services()
                    .into_iter()
                    .map(|upstream| ServiceDependency::new(service, upstream)),
            );
        }
    }
    Ok(dependencies)
}
