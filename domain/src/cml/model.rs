//! CML (Context Mapper DSL) document model.
//!
//! A plain tree mirroring the constructs the renderer emits. Cross links
//! (references, operation types, exposed aggregates) are by name, which is
//! how CML itself refers to them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlModel {
    pub context_map: CmlContextMap,
    pub bounded_contexts: Vec<CmlBoundedContext>,
}

impl CmlModel {
    pub fn bounded_context(&self, name: &str) -> Option<&CmlBoundedContext> {
        self.bounded_contexts.iter().find(|bc| bc.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlContextMap {
    /// Names of the Bounded Contexts the map contains
    pub contains: Vec<String>,
    pub relationships: Vec<CmlRelationship>,
}

/// `Upstream [U]->[D] Downstream` relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlRelationship {
    pub upstream: String,
    pub downstream: String,
    pub exposed_aggregates: Vec<String>,
    /// Rendered verbatim, already in `// ...` form
    pub exposed_aggregates_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlBoundedContext {
    pub name: String,
    pub implementation_technology: Option<String>,
    pub aggregates: Vec<CmlAggregate>,
}

impl CmlBoundedContext {
    pub fn aggregate(&self, name: &str) -> Option<&CmlAggregate> {
        self.aggregates.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlAggregate {
    pub name: String,
    /// Rendered verbatim, already in `/* ... */` form
    pub comment: Option<String>,
    pub domain_objects: Vec<CmlDomainObject>,
    pub services: Vec<CmlService>,
}

impl CmlAggregate {
    pub fn domain_object(&self, name: &str) -> Option<&CmlDomainObject> {
        self.domain_objects.iter().find(|o| o.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmlDomainObjectKind {
    Entity,
    ValueObject,
}

impl CmlDomainObjectKind {
    /// CML keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            CmlDomainObjectKind::Entity => "Entity",
            CmlDomainObjectKind::ValueObject => "ValueObject",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlDomainObject {
    pub name: String,
    pub kind: CmlDomainObjectKind,
    /// Only meaningful for entities
    pub aggregate_root: bool,
    pub comment: Option<String>,
    pub attributes: Vec<CmlAttribute>,
    pub references: Vec<CmlReference>,
    pub operations: Vec<CmlOperation>,
}

impl CmlDomainObject {
    pub fn new(name: impl Into<String>, kind: CmlDomainObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            aggregate_root: false,
            comment: None,
            attributes: Vec::new(),
            references: Vec::new(),
            operations: Vec::new(),
        }
    }
}

/// Attribute with a primitive type, e.g. `List<String> names`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlAttribute {
    pub name: String,
    pub ty: String,
    pub collection: Option<String>,
}

/// Reference to another domain object, e.g. `- List<Address> addresses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlReference {
    pub name: String,
    pub target: String,
    pub collection: Option<String>,
}

/// Target of a [`CmlComplexType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum CmlTypeTarget {
    Primitive(String),
    DomainObject(String),
}

/// Operation parameter or return type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlComplexType {
    pub target: CmlTypeTarget,
    pub collection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlParameter {
    pub name: String,
    pub ty: CmlComplexType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlOperation {
    pub name: String,
    /// `None` renders as `void`
    pub return_type: Option<CmlComplexType>,
    pub parameters: Vec<CmlParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmlService {
    pub name: String,
    pub comment: Option<String>,
    pub operations: Vec<CmlOperation>,
}
