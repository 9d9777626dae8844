//! Discovery strategies
//!
//! Bounded-context strategies turn one kind of artifact into Bounded
//! Contexts; relationship strategies connect the contexts found so far.
//! Strategies are run in registration order by
//! [`ContextMapDiscoverer`](crate::use_cases::discover_context_map::ContextMapDiscoverer).

pub mod annotated_type;
pub mod contract_schema;
pub mod names;
pub mod resource_based;
pub mod run;
pub mod topology;

use crate::ports::contract_reader::ContractReadError;
use crate::ports::topology_reader::TopologyReadError;
use discovery_domain::{BoundedContext, DomainError, Relationship};
use thiserror::Error;

pub use run::DiscoveryRun;

/// Errors raised by a discovery strategy
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error(transparent)]
    Contract(#[from] ContractReadError),

    #[error(transparent)]
    Topology(#[from] TopologyReadError),

    #[error("Invalid model: {0}")]
    Domain(#[from] DomainError),
}

/// Discovers Bounded Contexts from one kind of artifact
pub trait BoundedContextDiscoveryStrategy: Send + Sync {
    /// Short identifier used in logs and progress output
    fn id(&self) -> &str;

    /// Discover Bounded Contexts. Run-wide name tables live in `run`.
    fn discover_bounded_contexts(
        &self,
        run: &mut DiscoveryRun,
    ) -> Result<Vec<BoundedContext>, DiscoveryError>;
}

/// Name-based access to the Bounded Contexts discovered so far
pub trait BoundedContextLookup {
    /// Find a Bounded Context by a (possibly foreign) name, applying name mappings
    fn lookup_bounded_context(&self, name: &str) -> Option<&BoundedContext>;
}

/// Discovers relationships between already discovered Bounded Contexts
pub trait RelationshipDiscoveryStrategy: Send + Sync {
    fn id(&self) -> &str;

    fn discover_relationships(
        &self,
        lookup: &dyn BoundedContextLookup,
    ) -> Result<Vec<Relationship>, DiscoveryError>;
}

#[cfg(test)]
pub(crate) mod test_support;
