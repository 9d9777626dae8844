//! Type-metadata adapters

pub mod type_catalog;

pub use type_catalog::{CatalogError, TypeCatalog};
