//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod sources;

pub use output::{DEFAULT_OUTPUT_PATH, FileOutputConfig};
pub use sources::{
    FileNameMapping, FileOpenApiConfig, FileResourceSource, FileTaggedSource, FileTopologyConfig,
    RESOURCE_PRESETS,
};

use discovery_application::config::{DiscoveryPlan, NameMappingRule, ResourceSource, TaggedTypeSource};
use discovery_application::ports::context_map_writer::CML_EXTENSION;
use discovery_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Output settings
    pub output: FileOutputConfig,
    /// Routable-resource sources
    pub resources: Vec<FileResourceSource>,
    /// Annotated-type sources
    pub tagged: Vec<FileTaggedSource>,
    /// OpenAPI documents
    pub openapi: FileOpenApiConfig,
    /// Deployment topology
    pub topology: FileTopologyConfig,
    /// Name mappings used to relate topology names to Bounded Contexts
    pub name_mapping: Vec<FileNameMapping>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Missing discovery sources are not reported here; CLI flags may still add some.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !has_cml_extension(Path::new(&self.output.path)) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidOutputExtension {
                    path: self.output.path.clone(),
                },
                format!("output.path: '{}' must end with '.{CML_EXTENSION}'", self.output.path),
            ));
        }

        for (index, source) in self.resources.iter().enumerate() {
            issues.extend(source.parse_conventions(index).1);
        }
        for (index, source) in self.tagged.iter().enumerate() {
            issues.extend(source.validate(index));
        }

        for (index, mapping) in self.name_mapping.iter().enumerate() {
            if mapping.separator.is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyField {
                        field: format!("name_mapping[{index}].separator"),
                    },
                    format!("name_mapping[{index}].separator must not be empty"),
                ));
            }
        }

        issues
    }

    /// Build the discovery plan. Sources with unknown presets are skipped;
    /// [`validate`](Self::validate) reports them.
    pub fn to_plan(&self) -> DiscoveryPlan {
        let resources = self
            .resources
            .iter()
            .enumerate()
            .filter_map(|(index, source)| {
                let conventions = source.parse_conventions(index).0?;
                Some(ResourceSource {
                    catalog: PathBuf::from(&source.catalog),
                    scope: source.scope.clone(),
                    conventions,
                })
            })
            .collect();

        let tagged_types = self
            .tagged
            .iter()
            .map(|source| TaggedTypeSource {
                catalog: PathBuf::from(&source.catalog),
                scope: source.scope.clone(),
                tag: source.tag.clone(),
                technology: source.technology.clone(),
            })
            .collect();

        let name_mappings = self
            .name_mapping
            .iter()
            .filter(|mapping| !mapping.separator.is_empty())
            .map(|mapping| {
                let rule = NameMappingRule::new(&mapping.separator);
                match &mapping.strip_suffix {
                    Some(suffix) => rule.with_strip_suffix(suffix),
                    None => rule,
                }
            })
            .collect();

        DiscoveryPlan {
            resources,
            tagged_types,
            contract_locations: self.openapi.locations.clone(),
            topology_directories: self.topology.docker_compose.iter().map(PathBuf::from).collect(),
            name_mappings,
        }
    }
}

fn has_cml_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(CML_EXTENSION)
}
