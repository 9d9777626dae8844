//! Core domain concepts shared across the entity graph and the CML model.
//!
//! - [`error::DomainError`] — invalid-construction errors
//! - [`naming`] — identifier derivation from paths, titles and type names
//! - [`name_registry::NameRegistry`] — collision-free name allocation

pub mod error;
pub mod name_registry;
pub mod naming;
