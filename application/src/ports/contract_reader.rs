//! API-contract reader port.
//!
//! A contract is a machine-readable API description (OpenAPI and the like)
//! reduced to what discovery needs: paths with their operations, and the
//! schemas of parameters, request bodies and responses.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// HTTP verbs in the order operations are discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema of a value in a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaObject {
    /// Named schema reference; holds the key in the named-schema table
    Reference(String),
    /// Object with properties in declaration order
    Object { properties: Vec<(String, SchemaObject)> },
    Array { items: Box<SchemaObject> },
    /// Scalar; `type_name` is `None` when the contract omits the type
    Primitive { type_name: Option<String> },
}

impl SchemaObject {
    pub fn primitive(type_name: impl Into<String>) -> Self {
        SchemaObject::Primitive {
            type_name: Some(type_name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractParameter {
    pub name: String,
    pub schema: Option<SchemaObject>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractResponse {
    /// Status code or `default`
    pub status: String,
    pub schema: Option<SchemaObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractOperation {
    pub operation_id: Option<String>,
    pub parameters: Vec<ContractParameter>,
    pub request_body: Option<SchemaObject>,
    pub responses: Vec<ContractResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathItem {
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Declared operations, in [`HttpMethod::ALL`] order
    pub operations: Vec<(HttpMethod, ContractOperation)>,
}

impl PathItem {
    pub fn has_operations(&self) -> bool {
        !self.operations.is_empty()
    }
}

/// A parsed API contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiContract {
    pub title: String,
    /// Version of the contract format, e.g. `3.0.1`
    pub format_version: Option<String>,
    /// Paths in document order
    pub paths: Vec<PathItem>,
    /// Named schemas (`components/schemas`)
    pub schemas: BTreeMap<String, SchemaObject>,
}

/// Result of reading a contract: the contract plus non-fatal findings
#[derive(Debug, Clone)]
pub struct ContractParseOutcome {
    pub contract: ApiContract,
    pub warnings: Vec<String>,
}

#[derive(Error, Debug)]
pub enum ContractReadError {
    #[error("Could not read contract '{location}': {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse contract '{location}': {message}")]
    Parse { location: String, message: String },

    #[error("Contract '{0}' does not declare a title")]
    MissingTitle(String),
}

/// Port for reading API contracts
pub trait ContractReader: Send + Sync {
    fn read(&self, location: &str) -> Result<ContractParseOutcome, ContractReadError>;
}
