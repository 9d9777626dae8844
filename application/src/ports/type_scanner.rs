//! Type-metadata scanner port.
//!
//! Supplies structural metadata about the types of an application: which
//! types carry which tags, their fields (with generic shapes) and their
//! tagged operations. Infrastructure adapters decide where the metadata
//! comes from (an exported catalog, a compiler plugin, ...).

use discovery_domain::core::naming::simple_type_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A tag (annotation/attribute) with its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTag {
    pub name: String,
    /// Tag values, e.g. the mount paths of a routable resource
    #[serde(default)]
    pub values: Vec<String>,
}

impl TypeTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }
}

/// Generic shape of a field, parameter or return type.
///
/// `List<Customer>` is `{ type_name: "java.util.List", collection: Some("List"),
/// arguments: [Customer] }`, `Address[]` is `{ type_name: "Address", array: true }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeShape {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeShape>,
    /// Collection label when the raw type is a collection (`List`, `Set`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub array: bool,
}

impl TypeShape {
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn collection_of(label: impl Into<String>, raw: impl Into<String>, element: TypeShape) -> Self {
        Self {
            type_name: raw.into(),
            arguments: vec![element],
            collection: Some(label.into()),
            array: false,
        }
    }

    pub fn parameterized(raw: impl Into<String>, arguments: Vec<TypeShape>) -> Self {
        Self {
            type_name: raw.into(),
            arguments,
            ..Default::default()
        }
    }

    pub fn array_of(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            array: true,
            ..Default::default()
        }
    }

    /// Unwrap the shape to its element type and collection label.
    ///
    /// Parameterized shapes unwrap their first argument (recursively, an inner
    /// parameterized argument replaces the outer label); arrays are labelled
    /// `List`; anything else is its own element.
    pub fn element(&self) -> (&str, Option<&str>) {
        match self.arguments.first() {
            Some(first) if !first.arguments.is_empty() => first.element(),
            Some(first) if first.array => (&first.type_name, Some("List")),
            Some(first) => (&first.type_name, self.collection.as_deref()),
            None if self.array => (&self.type_name, Some("List")),
            None => (&self.type_name, None),
        }
    }

    /// Unwrap a data member's shape to its element type and collection label.
    ///
    /// Unlike [`element`](Self::element), only collection shapes unwrap their
    /// first argument. Other parameterized members (`Optional<Address>`) keep
    /// their raw type.
    pub fn member_element(&self) -> (&str, Option<&str>) {
        match (self.collection.as_deref(), self.arguments.first()) {
            (Some(label), Some(first)) => (&first.type_name, Some(label)),
            _ if self.array => (&self.type_name, Some("List")),
            _ => (&self.type_name, None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub shape: TypeShape,
    /// Compiler-generated member
    #[serde(default)]
    pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub shape: TypeShape,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<TypeTag>,
    /// `None` for operations without a return value
    #[serde(default)]
    pub return_shape: Option<TypeShape>,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl OperationDescriptor {
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(&t.name))
    }
}

/// Structural metadata of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub qualified_name: String,
    /// Package/module the type lives in; derived from the qualified name when empty
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub tags: Vec<TypeTag>,
    #[serde(default)]
    pub supertype: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

impl TypeDescriptor {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            ..Default::default()
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_type_name(&self.qualified_name)
    }

    pub fn scope(&self) -> &str {
        if !self.scope.is_empty() {
            return &self.scope;
        }
        self.qualified_name
            .rsplit_once('.')
            .map(|(scope, _)| scope)
            .unwrap_or("")
    }

    /// Whether the type lives in `scope` or one of its sub-scopes
    pub fn is_within(&self, scope: &str) -> bool {
        scope_contains(scope, self.scope())
    }

    pub fn tag(&self, name: &str) -> Option<&TypeTag> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }
}

/// `outer` contains `inner` when equal or when `inner` is a dotted sub-scope.
/// The empty scope contains everything.
pub fn scope_contains(outer: &str, inner: &str) -> bool {
    outer.is_empty()
        || inner == outer
        || inner
            .strip_prefix(outer)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Port for introspecting type metadata
pub trait TypeMetadataScanner: Send + Sync {
    /// All types inside `scope` carrying `tag`, in a stable order.
    fn find_tagged_types(&self, scope: &str, tag: &str) -> Vec<TypeDescriptor>;

    /// Look up a type by qualified name. `None` for unknown types.
    fn resolve_type(&self, qualified_name: &str) -> Option<TypeDescriptor>;

    /// Operations of `ty` carrying any of `tags`.
    fn find_tagged_operations(&self, ty: &TypeDescriptor, tags: &[String]) -> Vec<OperationDescriptor> {
        ty.operations
            .iter()
            .filter(|op| op.has_any_tag(tags))
            .cloned()
            .collect()
    }

    /// Data members of `ty` including inherited ones, supertypes first.
    ///
    /// Synthetic members and names starting with `$` are excluded.
    fn data_members(&self, ty: &TypeDescriptor) -> Vec<FieldDescriptor> {
        let mut chain = vec![ty.clone()];
        let mut seen: HashSet<String> = HashSet::from([ty.qualified_name.clone()]);
        let mut next = ty.supertype.clone();
        while let Some(name) = next {
            if !seen.insert(name.clone()) {
                break;
            }
            match self.resolve_type(&name) {
                Some(parent) => {
                    next = parent.supertype.clone();
                    chain.push(parent);
                }
                None => break,
            }
        }
        chain
            .iter()
            .rev()
            .flat_map(|t| t.fields.iter())
            .filter(|f| !f.synthetic && !f.name.starts_with('$'))
            .cloned()
            .collect()
    }
}
