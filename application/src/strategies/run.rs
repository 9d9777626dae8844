//! Run-scoped discovery state

use discovery_domain::NameRegistry;

/// State shared by all strategies of one discovery run.
///
/// Aggregate and value-object names discovered from type metadata must be
/// unique across the whole run, not just within one strategy.
#[derive(Debug, Default)]
pub struct DiscoveryRun {
    pub aggregate_names: NameRegistry,
    pub domain_object_names: NameRegistry,
}

impl DiscoveryRun {
    pub fn new() -> Self {
        Self::default()
    }
}
