//! Application layer for context-discovery
//!
//! This crate contains the discovery strategies, use cases and port definitions.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod strategies;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DiscoveryPlan, NameMappingRule, ResourceSource, TaggedTypeSource};
pub use ports::{
    context_map_writer::{ContextMapWriter, WriteError},
    contract_reader::{ContractReadError, ContractReader},
    progress::{DiscoveryProgressNotifier, NoProgress, StrategyStage},
    topology_reader::{ServiceDependency, TopologyReadError, TopologyReader},
    type_scanner::{TypeDescriptor, TypeMetadataScanner},
};
pub use strategies::{
    BoundedContextDiscoveryStrategy, BoundedContextLookup, DiscoveryError, DiscoveryRun,
    RelationshipDiscoveryStrategy,
    annotated_type::AnnotatedTypeDiscoveryStrategy,
    contract_schema::ContractDiscoveryStrategy,
    names::{BoundedContextNameMapping, IdentityNameMapping, SeparatorToCamelCase},
    resource_based::{ResourceBasedDiscoveryStrategy, ResourceConventions},
    topology::TopologyRelationshipStrategy,
};
pub use use_cases::discover_context_map::{
    ContextMapDiscoverer, DiscoverContextMapError, DiscoveryReport, StrategyFailure,
};
pub use use_cases::export_context_map::{
    ExportContextMapError, ExportContextMapInput, ExportContextMapOutput, ExportContextMapUseCase,
};
