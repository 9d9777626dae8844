//! Methods and their parameters

use super::types::{DomainObjectRef, Type};
use crate::core::error::{DomainError, require_name};
use serde::{Deserialize, Serialize};

/// A named, typed method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_name(name.into(), "Parameter")?,
            ty,
        })
    }
}

/// An operation on a domain object or a service.
///
/// Two methods are equal when they have the same owner and name.
/// Service methods have no domain-object owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    name: String,
    owner: Option<DomainObjectRef>,
    return_type: Option<Type>,
    parameters: Vec<Parameter>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_name(name.into(), "Method")?,
            owner: None,
            return_type: None,
            parameters: Vec::new(),
        })
    }

    pub fn with_owner(mut self, owner: DomainObjectRef) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_return_type(mut self, ty: Type) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn set_return_type(&mut self, ty: Option<Type>) {
        self.return_type = ty;
    }

    /// Append a parameter. A parameter with the same name replaces the earlier one.
    pub fn add_parameter(&mut self, parameter: Parameter) {
        match self.parameters.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => *existing = parameter,
            None => self.parameters.push(parameter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> Option<&DomainObjectRef> {
        self.owner.as_ref()
    }

    /// `None` means the method returns nothing.
    pub fn return_type(&self) -> Option<&Type> {
        self.return_type.as_ref()
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for Method {}
