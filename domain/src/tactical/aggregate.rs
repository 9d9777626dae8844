//! Aggregates: consistency boundaries grouping domain objects and services

use super::domain_object::{DomainObject, DomainObjectKind};
use super::service::Service;
use super::types::DomainObjectRef;
use crate::core::error::{DomainError, require_name};
use crate::util::upsert;
use serde::{Deserialize, Serialize};

/// Suffix marking the synthetic aggregate-root entity of a discovered aggregate.
pub const ROOT_ENTITY_SUFFIX: &str = "_RootEntity";

/// Name of the synthetic root entity for `aggregate`.
pub fn root_entity_name(aggregate: &str) -> String {
    format!("{aggregate}{ROOT_ENTITY_SUFFIX}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aggregate {
    name: String,
    context: String,
    comment: Option<String>,
    domain_objects: Vec<DomainObject>,
    services: Vec<Service>,
}

impl Aggregate {
    /// Create an empty aggregate owned by the Bounded Context `context`.
    pub fn new(context: impl Into<String>, name: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_name(name.into(), "Aggregate")?,
            context: context.into(),
            comment: None,
            domain_objects: Vec::new(),
            services: Vec::new(),
        })
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning Bounded Context
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn domain_objects(&self) -> &[DomainObject] {
        &self.domain_objects
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Create an empty domain object owned by this aggregate and add it.
    ///
    /// An existing object with the same kind and name is replaced.
    pub fn create_domain_object(
        &mut self,
        kind: DomainObjectKind,
        name: impl Into<String>,
    ) -> Result<&mut DomainObject, DomainError> {
        let object = DomainObject::new(kind, self.context.clone(), self.name.clone(), name)?;
        let handle = object.handle().clone();
        upsert(&mut self.domain_objects, object);
        self.domain_object_mut(&handle.name)
            .ok_or(DomainError::UnknownDomainObject(handle.to_string()))
    }

    /// Add a domain object created for this aggregate.
    ///
    /// Fails when the object's handle points into another aggregate.
    pub fn add_domain_object(&mut self, object: DomainObject) -> Result<(), DomainError> {
        let handle = object.handle();
        if handle.context != self.context || handle.aggregate != self.name {
            return Err(DomainError::ForeignDomainObject(handle.to_string()));
        }
        upsert(&mut self.domain_objects, object);
        Ok(())
    }

    pub fn domain_object(&self, name: &str) -> Option<&DomainObject> {
        self.domain_objects.iter().find(|o| o.name() == name)
    }

    pub fn domain_object_mut(&mut self, name: &str) -> Option<&mut DomainObject> {
        self.domain_objects.iter_mut().find(|o| o.name() == name)
    }

    /// Look up a domain object by handle; the handle must point into this aggregate.
    pub fn resolve(&self, handle: &DomainObjectRef) -> Option<&DomainObject> {
        if handle.context != self.context || handle.aggregate != self.name {
            return None;
        }
        self.domain_object(&handle.name)
    }

    /// The synthetic root entity, recognised by its name suffix
    pub fn root_entity(&self) -> Option<&DomainObject> {
        self.domain_objects.iter().find(|o| {
            o.kind() == DomainObjectKind::Entity && o.name().ends_with(ROOT_ENTITY_SUFFIX)
        })
    }

    pub fn add_service(&mut self, service: Service) {
        upsert(&mut self.services, service);
    }

    pub fn service_mut(&mut self, name: &str) -> Option<&mut Service> {
        self.services.iter_mut().find(|s| s.name() == name)
    }
}

impl PartialEq for Aggregate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Aggregate {}
