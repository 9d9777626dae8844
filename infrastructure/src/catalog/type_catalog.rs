//! Type catalog: type metadata exported by a build step.
//!
//! The manifest is JSON or YAML (chosen by file extension):
//!
//! ```yaml
//! types:
//!   - qualified_name: com.acme.customer.CustomerApplication
//!     tags: [{ name: SpringBootApplication }]
//!   - qualified_name: com.acme.customer.CustomerController
//!     tags: [{ name: RequestMapping, values: ["/customers"] }]
//!     operations:
//!       - name: getCustomers
//!         tags: [{ name: GetMapping }]
//!         return_shape:
//!           type_name: java.util.List
//!           collection: List
//!           arguments: [{ type_name: com.acme.customer.Customer }]
//! ```

use discovery_application::ports::type_scanner::{TypeDescriptor, TypeMetadataScanner};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Could not read type catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid type catalog {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid type catalog {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogManifest {
    #[serde(default)]
    types: Vec<TypeDescriptor>,
}

/// In-memory type metadata, in manifest order
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
}

impl TypeCatalog {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        // later duplicates shadow earlier ones on lookup
        let index = types
            .iter()
            .enumerate()
            .map(|(position, ty)| (ty.qualified_name.clone(), position))
            .collect();
        Self { types, index }
    }

    /// Load a manifest; `.yml`/`.yaml` files are read as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));
        let manifest: CatalogManifest = if is_yaml {
            serde_yaml::from_str(&text).map_err(|source| CatalogError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_json::from_str(&text).map_err(|source| CatalogError::Json {
                path: path.to_path_buf(),
                source,
            })?
        };

        debug!(path = %path.display(), types = manifest.types.len(), "Loaded type catalog");
        Ok(Self::new(manifest.types))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeMetadataScanner for TypeCatalog {
    fn find_tagged_types(&self, scope: &str, tag: &str) -> Vec<TypeDescriptor> {
        self.types
            .iter()
            .filter(|ty| ty.is_within(scope) && ty.has_tag(tag))
            .cloned()
            .collect()
    }

    fn resolve_type(&self, qualified_name: &str) -> Option<TypeDescriptor> {
        self.index
            .get(qualified_name)
            .and_then(|&position| self.types.get(position))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const CATALOG_JSON: &str = r#"{
  "types": [
    {
      "qualified_name": "com.acme.customer.CustomerApplication",
      "tags": [{ "name": "SpringBootApplication" }]
    },
    {
      "qualified_name": "com.acme.customer.web.CustomerController",
      "tags": [{ "name": "RequestMapping", "values": ["/customers"] }],
      "operations": [
        {
          "name": "getCustomer",
          "tags": [{ "name": "GetMapping" }],
          "return_shape": { "type_name": "com.acme.customer.Customer" },
          "parameters": [{ "name": "id", "shape": { "type_name": "java.lang.String" } }]
        }
      ]
    },
    {
      "qualified_name": "com.acme.customer.Customer",
      "supertype": "com.acme.shared.Entity",
      "fields": [{ "name": "name", "shape": { "type_name": "java.lang.String" } }]
    },
    {
      "qualified_name": "com.acme.shared.Entity",
      "fields": [
        { "name": "id", "shape": { "type_name": "java.lang.Long" } },
        { "name": "$jacocoData", "shape": { "type_name": "boolean", "array": true }, "synthetic": true }
      ]
    },
    {
      "qualified_name": "com.acmecorp.OtherApplication",
      "tags": [{ "name": "SpringBootApplication" }]
    }
  ]
}"#;

    fn write_catalog(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_catalog() {
        let file = write_catalog(".json", CATALOG_JSON);
        let catalog = TypeCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 5);

        let controller = catalog.resolve_type("com.acme.customer.web.CustomerController").unwrap();
        assert_eq!(controller.tag("RequestMapping").unwrap().values, vec!["/customers"]);
        assert_eq!(controller.operations[0].parameters[0].name, "id");
    }

    #[test]
    fn test_find_tagged_types_respects_scope_boundaries() {
        let file = write_catalog(".json", CATALOG_JSON);
        let catalog = TypeCatalog::load(file.path()).unwrap();

        let found = catalog.find_tagged_types("com.acme", "SpringBootApplication");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].simple_name(), "CustomerApplication");
        assert_eq!(catalog.find_tagged_types("", "SpringBootApplication").len(), 2);
    }

    #[test]
    fn test_data_members_include_inherited_fields() {
        let file = write_catalog(".json", CATALOG_JSON);
        let catalog = TypeCatalog::load(file.path()).unwrap();
        let customer = catalog.resolve_type("com.acme.customer.Customer").unwrap();
        let names: Vec<_> = catalog.data_members(&customer).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn test_load_yaml_catalog() {
        let yaml = r#"
types:
  - qualified_name: com.acme.policy.PolicyApplication
    tags:
      - name: SpringBootApplication
  - qualified_name: com.acme.policy.Policy
    fields:
      - name: insuringAgreement
        shape:
          type_name: java.util.List
          collection: List
          arguments:
            - type_name: com.acme.policy.Item
"#;
        let file = write_catalog(".yaml", yaml);
        let catalog = TypeCatalog::load(file.path()).unwrap();
        let policy = catalog.resolve_type("com.acme.policy.Policy").unwrap();
        assert_eq!(
            policy.fields[0].shape.element(),
            ("com.acme.policy.Item", Some("List"))
        );
    }

    #[test]
    fn test_invalid_catalog() {
        let file = write_catalog(".json", "{ \"types\": 3 }");
        assert!(matches!(TypeCatalog::load(file.path()), Err(CatalogError::Json { .. })));
        assert!(matches!(
            TypeCatalog::load(Path::new("/nonexistent/types.json")),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn test_unknown_type_resolves_to_none() {
        assert!(TypeCatalog::default().resolve_type("java.lang.String").is_none());
        assert!(TypeCatalog::default().is_empty());
    }
}
