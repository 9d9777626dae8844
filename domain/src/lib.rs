//! Domain layer for context-discovery
//!
//! This crate contains the entity graph produced by discovery, the naming
//! rules shared by all discovery algorithms, and the CML document model the
//! graph is converted into. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Strategic model
//!
//! - **Context Map**: Bounded Contexts plus upstream/downstream relationships
//! - **Bounded Context**: a named unit with an implementation technology and aggregates
//!
//! ## Tactical model
//!
//! - **Aggregate**: owns domain objects (entities, value objects) and services
//! - **Domain Object**: attributes, references and methods; cross links are
//!   [`DomainObjectRef`] handles
//!
//! ## CML
//!
//! [`ContextMapToCmlConverter`] turns a [`ContextMap`] into a [`CmlModel`],
//! which infrastructure renders as Context Mapper DSL text.

pub mod cml;
pub mod config;
pub mod core;
pub mod strategic;
pub mod tactical;
pub mod util;

// Re-export commonly used types
pub use cml::{CmlModel, ContextMapToCmlConverter, map_primitive_type};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, name_registry::NameRegistry};
pub use strategic::{BoundedContext, ContextMap, Relationship};
pub use tactical::{
    Aggregate, Attribute, DomainObject, DomainObjectKind, DomainObjectRef, Method, Parameter,
    Reference, Service, Type, TypeKind, root_entity_name,
};
