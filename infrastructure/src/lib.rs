//! Infrastructure layer for context-discovery
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod cml;
pub mod config;
pub mod contract;
pub mod topology;

// Re-export commonly used types
pub use catalog::{CatalogError, TypeCatalog};
pub use cml::{CmlFileWriter, CmlRenderer};
pub use config::{ConfigLoader, FileConfig, FileOutputConfig};
pub use contract::OpenApiContractReader;
pub use topology::DockerComposeReader;
