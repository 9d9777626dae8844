//! Domain objects (entities and value objects) with their attributes and references

use super::method::Method;
use super::types::{DomainObjectRef, Type};
use crate::core::error::{DomainError, require_name};
use crate::util::upsert;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of a [`DomainObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainObjectKind {
    Entity,
    ValueObject,
}

impl DomainObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainObjectKind::Entity => "Entity",
            DomainObjectKind::ValueObject => "ValueObject",
        }
    }
}

impl fmt::Display for DomainObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structural field holding a primitive or a domain object by value.
///
/// Equal when owner and name are equal; the type is not compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub ty: Type,
    pub owner: DomainObjectRef,
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for Attribute {}

/// A field pointing at another domain object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    name: String,
    target: DomainObjectRef,
    ty: Type,
    owner: DomainObjectRef,
}

impl Reference {
    /// Fails when `ty` is a primitive type.
    pub fn new(owner: DomainObjectRef, name: impl Into<String>, ty: Type) -> Result<Self, DomainError> {
        let name = require_name(name.into(), "Reference")?;
        let target = ty
            .as_domain_object()
            .cloned()
            .ok_or_else(|| DomainError::PrimitiveReference(ty.name().to_string()))?;
        Ok(Self {
            name,
            target,
            ty,
            owner,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The referenced domain object
    pub fn target(&self) -> &DomainObjectRef {
        &self.target
    }

    pub fn owner(&self) -> &DomainObjectRef {
        &self.owner
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for Reference {}

/// Entity or value object inside an aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainObject {
    handle: DomainObjectRef,
    kind: DomainObjectKind,
    origin_type: Option<String>,
    comment: Option<String>,
    attributes: Vec<Attribute>,
    references: Vec<Reference>,
    methods: Vec<Method>,
}

impl DomainObject {
    /// Create an empty domain object owned by `context`/`aggregate`.
    pub fn new(
        kind: DomainObjectKind,
        context: impl Into<String>,
        aggregate: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = require_name(name.into(), "Domain Object")?;
        Ok(Self {
            handle: DomainObjectRef::new(context, aggregate, name),
            kind,
            origin_type: None,
            comment: None,
            attributes: Vec::new(),
            references: Vec::new(),
            methods: Vec::new(),
        })
    }

    /// Record the type this object was derived from
    pub fn with_origin_type(mut self, origin: impl Into<String>) -> Self {
        self.origin_type = Some(origin.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.handle.name
    }

    pub fn kind(&self) -> DomainObjectKind {
        self.kind
    }

    pub fn handle(&self) -> &DomainObjectRef {
        &self.handle
    }

    pub fn origin_type(&self) -> Option<&str> {
        self.origin_type.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn add_attribute(&mut self, name: impl Into<String>, ty: Type) -> Result<(), DomainError> {
        let attribute = Attribute {
            name: require_name(name.into(), "Attribute")?,
            ty,
            owner: self.handle.clone(),
        };
        upsert(&mut self.attributes, attribute);
        Ok(())
    }

    pub fn add_reference(&mut self, name: impl Into<String>, ty: Type) -> Result<(), DomainError> {
        let reference = Reference::new(self.handle.clone(), name, ty)?;
        upsert(&mut self.references, reference);
        Ok(())
    }

    /// Add a method; its owner is set to this object.
    pub fn add_method(&mut self, method: Method) {
        upsert(&mut self.methods, method.with_owner(self.handle.clone()));
    }

    pub fn method_mut(&mut self, name: &str) -> Option<&mut Method> {
        self.methods.iter_mut().find(|m| m.name() == name)
    }
}

impl PartialEq for DomainObject {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.handle.name == other.handle.name
    }
}

impl Eq for DomainObject {}
