//! Discovery source sections from TOML
//!
//! ```toml
//! [[resources]]
//! catalog = "build/types.json"
//! scope = "com.acme.insurance"
//! preset = "spring-boot"
//!
//! [[tagged]]
//! catalog = "build/types.json"
//! scope = "com.acme"
//! tag = "BoundedContext"
//! technology = "Java"
//!
//! [openapi]
//! locations = ["api/customer.yml"]
//!
//! [topology]
//! docker_compose = ["."]
//!
//! [[name_mapping]]
//! separator = "-"
//! strip_suffix = "Backend"
//! ```

use discovery_application::strategies::resource_based::ResourceConventions;
use discovery_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

pub const RESOURCE_PRESETS: &[&str] = &["spring-boot"];

/// `[[resources]]`: routable-resource discovery over a type catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResourceSource {
    pub catalog: String,
    pub scope: String,
    pub preset: String,
}

impl Default for FileResourceSource {
    fn default() -> Self {
        Self {
            catalog: String::new(),
            scope: String::new(),
            preset: "spring-boot".to_string(),
        }
    }
}

impl FileResourceSource {
    /// Resolve the preset, reporting unknown names
    pub fn parse_conventions(&self, index: usize) -> (Option<ResourceConventions>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let field = format!("resources[{index}]");

        if self.catalog.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyField {
                    field: format!("{field}.catalog"),
                },
                format!("{field}.catalog: a type catalog is required"),
            ));
        }
        if self.scope.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyField {
                    field: format!("{field}.scope"),
                },
                format!("{field}.scope is empty, every type of the catalog is scanned"),
            ));
        }

        let conventions = ResourceConventions::preset(&self.preset);
        if conventions.is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEnumValue {
                    field: format!("{field}.preset"),
                    value: self.preset.clone(),
                    valid_values: RESOURCE_PRESETS.iter().map(|p| p.to_string()).collect(),
                },
                format!("{field}.preset: unknown preset '{}'", self.preset),
            ));
        }
        (conventions, issues)
    }
}

/// `[[tagged]]`: annotated-type discovery over a type catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTaggedSource {
    pub catalog: String,
    pub scope: String,
    pub tag: String,
    pub technology: String,
}

impl Default for FileTaggedSource {
    fn default() -> Self {
        Self {
            catalog: String::new(),
            scope: String::new(),
            tag: "BoundedContext".to_string(),
            technology: String::new(),
        }
    }
}

impl FileTaggedSource {
    pub fn validate(&self, index: usize) -> Vec<ConfigIssue> {
        let field = format!("tagged[{index}]");
        [("catalog", &self.catalog), ("tag", &self.tag)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| {
                ConfigIssue::error(
                    ConfigIssueCode::EmptyField {
                        field: format!("{field}.{name}"),
                    },
                    format!("{field}.{name} must not be empty"),
                )
            })
            .collect()
    }
}

/// `[openapi]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenApiConfig {
    pub locations: Vec<String>,
}

/// `[topology]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTopologyConfig {
    /// Directories searched for docker-compose files
    pub docker_compose: Vec<String>,
}

/// `[[name_mapping]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNameMapping {
    pub separator: String,
    pub strip_suffix: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_domain::Severity;

    #[test]
    fn test_resource_defaults_to_spring_boot() {
        let source: FileResourceSource = toml::from_str(r#"catalog = "types.json""#).unwrap();
        assert_eq!(source.preset, "spring-boot");
        let (conventions, issues) = source.parse_conventions(0);
        assert_eq!(conventions, Some(ResourceConventions::spring_boot()));
        // empty scope only warns
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_unknown_preset_is_error() {
        let source = FileResourceSource {
            catalog: "types.json".to_string(),
            scope: "com.acme".to_string(),
            preset: "rails".to_string(),
        };
        let (conventions, issues) = source.parse_conventions(2);
        assert!(conventions.is_none());
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::InvalidEnumValue { field, value, .. } if field == "resources[2].preset" && value == "rails"
        ));
    }

    #[test]
    fn test_tagged_requires_catalog_and_tag() {
        let source = FileTaggedSource {
            tag: String::new(),
            ..Default::default()
        };
        let issues = source.validate(0);
        assert_eq!(issues.len(), 2);
        assert!(ConfigIssue::has_errors(&issues));
    }
}
