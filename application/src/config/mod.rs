//! Application-level configuration.
//!
//! - [`DiscoveryPlan`] describes the sources a discovery run scans

pub mod discovery_plan;

pub use discovery_plan::{DiscoveryPlan, NameMappingRule, ResourceSource, TaggedTypeSource};
