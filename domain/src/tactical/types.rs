//! Type value objects used by attributes, references, parameters and return values.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-owning handle to a [`DomainObject`](super::domain_object::DomainObject).
///
/// Identifies the object by its owning Bounded Context, Aggregate and name.
/// Names are unique within an aggregate, so the triple is a stable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainObjectRef {
    pub context: String,
    pub aggregate: String,
    pub name: String,
}

impl DomainObjectRef {
    pub fn new(
        context: impl Into<String>,
        aggregate: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            aggregate: aggregate.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DomainObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.context, self.aggregate, self.name)
    }
}

/// What a [`Type`] points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum TypeKind {
    Primitive(String),
    DomainObject(DomainObjectRef),
}

/// A primitive or domain-object type with an optional collection wrapper.
///
/// Equality covers the target and the collection label, so `List<Address>`
/// and `Address` are different types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collection: Option<String>,
}

impl Type {
    /// Primitive type. Fails on an empty name.
    pub fn primitive(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyPrimitiveType);
        }
        Ok(Self {
            kind: TypeKind::Primitive(name),
            collection: None,
        })
    }

    pub fn domain_object(target: DomainObjectRef) -> Self {
        Self {
            kind: TypeKind::DomainObject(target),
            collection: None,
        }
    }

    /// Wrap the type in a collection (`List`, `Set`, ...). Empty labels are ignored.
    pub fn with_collection(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.collection = if label.is_empty() { None } else { Some(label) };
        self
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Primitive spelling or target object name
    pub fn name(&self) -> &str {
        match &self.kind {
            TypeKind::Primitive(name) => name,
            TypeKind::DomainObject(target) => &target.name,
        }
    }

    pub fn as_domain_object(&self) -> Option<&DomainObjectRef> {
        match &self.kind {
            TypeKind::DomainObject(target) => Some(target),
            TypeKind::Primitive(_) => None,
        }
    }

    pub fn is_domain_object(&self) -> bool {
        self.as_domain_object().is_some()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.collection {
            Some(label) => write!(f, "{}<{}>", label, self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> DomainObjectRef {
        DomainObjectRef::new("Customer", "customers", "Address")
    }

    #[test]
    fn test_empty_primitive_rejected() {
        assert_eq!(Type::primitive(""), Err(DomainError::EmptyPrimitiveType));
        assert_eq!(Type::primitive("  "), Err(DomainError::EmptyPrimitiveType));
    }

    #[test]
    fn test_primitive_and_object_with_same_name_differ() {
        let primitive = Type::primitive("Address").unwrap();
        let object = Type::domain_object(address());
        assert_eq!(primitive.name(), object.name());
        assert_ne!(primitive, object);
    }

    #[test]
    fn test_collection_label_is_part_of_equality() {
        let single = Type::domain_object(address());
        let list = Type::domain_object(address()).with_collection("List");
        assert_ne!(single, list);
        assert_eq!(list.collection(), Some("List"));
        assert_eq!(list.to_string(), "List<Address>");
    }

    #[test]
    fn test_empty_collection_label_ignored() {
        let ty = Type::primitive("String").unwrap().with_collection("");
        assert_eq!(ty.collection(), None);
    }

    #[test]
    fn test_serialize_domain_object_type() {
        let json = serde_json::to_value(Type::domain_object(address())).unwrap();
        assert_eq!(json["kind"]["kind"], "domain_object");
        assert_eq!(json["kind"]["target"]["name"], "Address");
    }
}
