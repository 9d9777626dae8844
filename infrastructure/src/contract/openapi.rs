//! OpenAPI 3.x contract reader.
//!
//! Documents are read as YAML (JSON is accepted as well) into a generic
//! [`serde_yaml::Value`] and reduced to the [`ApiContract`] shape. Mappings
//! keep document order, so paths and properties come out as declared.

use discovery_application::ports::contract_reader::{
    ApiContract, ContractOperation, ContractParameter, ContractParseOutcome, ContractReadError,
    ContractReader, ContractResponse, HttpMethod, PathItem, SchemaObject,
};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
const PREFERRED_MEDIA_TYPE: &str = "application/json";

/// Reads OpenAPI documents from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiContractReader;

impl OpenApiContractReader {
    pub fn new() -> Self {
        Self
    }
}

impl ContractReader for OpenApiContractReader {
    fn read(&self, location: &str) -> Result<ContractParseOutcome, ContractReadError> {
        let text = fs::read_to_string(location).map_err(|source| ContractReadError::Io {
            location: location.to_string(),
            source,
        })?;
        parse_contract(location, &text)
    }
}

/// Parse an OpenAPI document given as text.
pub fn parse_contract(location: &str, text: &str) -> Result<ContractParseOutcome, ContractReadError> {
    let document: Value = serde_yaml::from_str(text).map_err(|e| ContractReadError::Parse {
        location: location.to_string(),
        message: e.to_string(),
    })?;
    let Some(root) = document.as_mapping() else {
        return Err(ContractReadError::Parse {
            location: location.to_string(),
            message: "the document root is not a mapping".to_string(),
        });
    };

    let mut parser = DocumentParser {
        root,
        warnings: Vec::new(),
    };
    let contract = parser.contract(location)?;
    debug!(
        location = %location,
        paths = contract.paths.len(),
        schemas = contract.schemas.len(),
        "Parsed OpenAPI document"
    );
    Ok(ContractParseOutcome {
        contract,
        warnings: parser.warnings,
    })
}

struct DocumentParser<'a> {
    root: &'a Mapping,
    warnings: Vec<String>,
}

impl<'a> DocumentParser<'a> {
    fn contract(&mut self, location: &str) -> Result<ApiContract, ContractReadError> {
        let format_version = self.format_version();

        let title = get(self.root, "info")
            .and_then(|info| str_field(info, "title"))
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| ContractReadError::MissingTitle(location.to_string()))?
            .to_string();

        let paths = match get(self.root, "paths").and_then(Value::as_mapping) {
            Some(paths) => paths
                .iter()
                .filter_map(|(key, item)| Some((key_string(key)?, item.as_mapping()?)))
                .map(|(path, item)| self.path_item(path, item))
                .collect(),
            None => {
                self.warnings.push("attribute paths is missing".to_string());
                Vec::new()
            }
        };

        let schemas: BTreeMap<String, SchemaObject> = self
            .component("schemas")
            .map(|schemas| {
                schemas
                    .iter()
                    .filter_map(|(key, schema)| Some((key_string(key)?, self.schema(schema))))
                    .collect()
            })
            .unwrap_or_default();

        Ok(ApiContract {
            title,
            format_version,
            paths,
            schemas,
        })
    }

    fn format_version(&mut self) -> Option<String> {
        match get(self.root, "openapi").and_then(scalar_string) {
            Some(version) if version.starts_with("3.") => Some(version),
            Some(version) => {
                self.warnings
                    .push(format!("unsupported OpenAPI version '{version}', reading it as 3.x"));
                Some(version)
            }
            None => {
                self.warnings.push("attribute openapi is missing".to_string());
                None
            }
        }
    }

    fn component(&self, section: &str) -> Option<&'a Mapping> {
        get(self.root, "components")
            .and_then(|components| get_mapping(components, section))
    }

    /// Follow a local `#/components/<section>/<name>` reference, if `value` is one.
    fn dereference(&mut self, value: &'a Value, section: &str) -> Option<&'a Value> {
        let Some(reference) = str_field(value, "$ref") else {
            return Some(value);
        };
        let prefix = format!("#/components/{section}/");
        let target = reference
            .strip_prefix(prefix.as_str())
            .and_then(|name| self.component(section)?.get(name));
        if target.is_none() {
            self.warnings.push(format!("could not resolve reference '{reference}'"));
        }
        target
    }

    fn path_item(&mut self, path: String, item: &'a Mapping) -> PathItem {
        let operations = HttpMethod::ALL
            .into_iter()
            .filter_map(|verb| {
                let operation = item.get(verb.as_str())?;
                Some((verb, self.operation(operation)))
            })
            .collect();

        PathItem {
            summary: item.get("summary").and_then(Value::as_str).map(str::to_string),
            description: item.get("description").and_then(Value::as_str).map(str::to_string),
            path,
            operations,
        }
    }

    fn operation(&mut self, operation: &'a Value) -> ContractOperation {
        let parameters = operation
            .get("parameters")
            .and_then(Value::as_sequence)
            .map(|parameters| {
                parameters
                    .iter()
                    .filter_map(|parameter| self.parameter(parameter))
                    .collect()
            })
            .unwrap_or_default();

        let request_body = operation
            .get("requestBody")
            .and_then(|body| self.dereference(body, "requestBodies"))
            .and_then(|body| self.content_schema(body));

        let responses = operation
            .get("responses")
            .and_then(Value::as_mapping)
            .map(|responses| {
                responses
                    .iter()
                    .filter_map(|(status, response)| {
                        let status = key_string(status)?;
                        let schema = self
                            .dereference(response, "responses")
                            .and_then(|response| self.content_schema(response));
                        Some(ContractResponse { status, schema })
                    })
                    .collect()
            })
            .unwrap_or_default();

        ContractOperation {
            operation_id: str_field(operation, "operationId").map(str::to_string),
            parameters,
            request_body,
            responses,
        }
    }

    fn parameter(&mut self, parameter: &'a Value) -> Option<ContractParameter> {
        let parameter = self.dereference(parameter, "parameters")?;
        let name = str_field(parameter, "name")?.to_string();
        let schema = match parameter.get("schema") {
            Some(schema) => Some(self.schema(schema)),
            None => self.content_schema(parameter),
        };
        Some(ContractParameter { name, schema })
    }

    /// Schema of the preferred media type of a `content` map, else of the first one.
    fn content_schema(&mut self, holder: &'a Value) -> Option<SchemaObject> {
        let content = get_mapping(holder, "content")?;
        let media = content
            .get(PREFERRED_MEDIA_TYPE)
            .or_else(|| content.iter().next().map(|(_, media)| media))?;
        media.get("schema").map(|schema| self.schema(schema))
    }

    fn schema(&mut self, schema: &'a Value) -> SchemaObject {
        if let Some(reference) = str_field(schema, "$ref") {
            return match reference.strip_prefix(SCHEMA_REF_PREFIX) {
                Some(key) => SchemaObject::Reference(key.to_string()),
                None => {
                    self.warnings
                        .push(format!("unsupported schema reference '{reference}'"));
                    SchemaObject::Primitive { type_name: None }
                }
            };
        }

        // composed schemas are read as their first member
        for keyword in ["allOf", "oneOf", "anyOf"] {
            if let Some(first) = schema
                .get(keyword)
                .and_then(Value::as_sequence)
                .and_then(|members| members.first())
            {
                return self.schema(first);
            }
        }

        let type_name = str_field(schema, "type");
        match type_name {
            Some("array") => SchemaObject::Array {
                items: Box::new(match schema.get("items") {
                    Some(items) => self.schema(items),
                    None => SchemaObject::Primitive { type_name: None },
                }),
            },
            Some("object") => SchemaObject::Object {
                properties: self.properties(schema),
            },
            None if schema.get("properties").is_some() => SchemaObject::Object {
                properties: self.properties(schema),
            },
            other => SchemaObject::Primitive {
                type_name: other.map(str::to_string),
            },
        }
    }

    fn properties(&mut self, schema: &'a Value) -> Vec<(String, SchemaObject)> {
        get_mapping(schema, "properties")
            .map(|properties| {
                properties
                    .iter()
                    .filter_map(|(key, property)| Some((key_string(key)?, self.schema(property))))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn get<'v>(mapping: &'v Mapping, key: &str) -> Option<&'v Value> {
    mapping.get(key)
}

fn get_mapping<'v>(value: &'v Value, key: &str) -> Option<&'v Mapping> {
    value.get(key).and_then(Value::as_mapping)
}

fn str_field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value.get(key).and_then(Value::as_str)
}

/// Mapping keys and versions may be numbers in YAML (`200:`, `openapi: 3.0`)
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn key_string(key: &Value) -> Option<String> {
    scalar_string(key)
}
