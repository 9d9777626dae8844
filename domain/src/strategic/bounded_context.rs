//! Bounded Context entity

use crate::core::error::{DomainError, require_name};
use crate::tactical::{Aggregate, DomainObject, DomainObjectRef};
use crate::util::upsert;
use serde::{Deserialize, Serialize};

/// A Bounded Context with its aggregates.
///
/// Equality is by name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundedContext {
    name: String,
    technology: Option<String>,
    aggregates: Vec<Aggregate>,
}

impl BoundedContext {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_name(name.into(), "Bounded Context")?,
            technology: None,
            aggregates: Vec::new(),
        })
    }

    /// Set the implementation technology label (free text)
    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }

    pub fn aggregates(&self) -> &[Aggregate] {
        &self.aggregates
    }

    /// Add an aggregate; one with the same name is replaced.
    pub fn add_aggregate(&mut self, aggregate: Aggregate) {
        upsert(&mut self.aggregates, aggregate);
    }

    pub fn aggregate(&self, name: &str) -> Option<&Aggregate> {
        self.aggregates.iter().find(|a| a.name() == name)
    }

    pub fn aggregate_mut(&mut self, name: &str) -> Option<&mut Aggregate> {
        self.aggregates.iter_mut().find(|a| a.name() == name)
    }

    pub fn resolve(&self, handle: &DomainObjectRef) -> Option<&DomainObject> {
        if handle.context != self.name {
            return None;
        }
        self.aggregate(&handle.aggregate)?.resolve(handle)
    }

    pub fn domain_object_count(&self) -> usize {
        self.aggregates.iter().map(|a| a.domain_objects().len()).sum()
    }
}

impl PartialEq for BoundedContext {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for BoundedContext {}
