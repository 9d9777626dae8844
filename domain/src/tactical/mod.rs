//! Tactical building blocks: aggregates and everything they own.
//!
//! Ownership is a tree (aggregate → domain object → attribute/reference/method).
//! Cross links ([`Type`] targets, references) are [`DomainObjectRef`] keys,
//! never owning pointers.

pub mod aggregate;
pub mod domain_object;
pub mod method;
pub mod service;
pub mod types;

pub use aggregate::{Aggregate, ROOT_ENTITY_SUFFIX, root_entity_name};
pub use domain_object::{Attribute, DomainObject, DomainObjectKind, Reference};
pub use method::{Method, Parameter};
pub use service::Service;
pub use types::{DomainObjectRef, Type, TypeKind};
