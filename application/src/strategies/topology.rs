//! Relationship discovery from deployment topology.
//!
//! A "service depends on service" pair becomes an upstream/downstream
//! relationship when both names resolve to discovered Bounded Contexts.

use super::{BoundedContextLookup, DiscoveryError, RelationshipDiscoveryStrategy};
use crate::ports::topology_reader::TopologyReader;
use discovery_domain::Relationship;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Comment attached to relationships exposing every upstream aggregate
pub const EXPOSE_ALL_COMMENT: &str = "The list of exposed Aggregates may contain Aggregates which are not used by the downstream (discovery strategy simply added all Aggregates).";

pub struct TopologyRelationshipStrategy {
    source: PathBuf,
    reader: Arc<dyn TopologyReader>,
}

impl TopologyRelationshipStrategy {
    pub fn new(source: impl Into<PathBuf>, reader: Arc<dyn TopologyReader>) -> Self {
        Self {
            source: source.into(),
            reader,
        }
    }
}

impl RelationshipDiscoveryStrategy for TopologyRelationshipStrategy {
    fn id(&self) -> &str {
        "docker-compose"
    }

    fn discover_relationships(
        &self,
        lookup: &dyn BoundedContextLookup,
    ) -> Result<Vec<Relationship>, DiscoveryError> {
        let mut relationships = Vec::new();
        for dependency in self.reader.read_dependencies(&self.source)? {
            let upstream = lookup.lookup_bounded_context(&dependency.depends_on);
            let downstream = lookup.lookup_bounded_context(&dependency.service);
            let (Some(upstream), Some(downstream)) = (upstream, downstream) else {
                debug!(
                    service = %dependency.service,
                    depends_on = %dependency.depends_on,
                    "Dependency does not connect two discovered contexts"
                );
                continue;
            };

            let mut relationship = Relationship::new(upstream, downstream);
            if relationship.expose_all_aggregates() > 0 {
                relationship.set_comment(EXPOSE_ALL_COMMENT);
            }
            relationships.push(relationship);
        }
        Ok(relationships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::topology_reader::ServiceDependency;
    use crate::strategies::test_support::FixedTopology;
    use discovery_domain::{Aggregate, BoundedContext};

    struct Contexts(Vec<BoundedContext>);

    impl BoundedContextLookup for Contexts {
        fn lookup_bounded_context(&self, name: &str) -> Option<&BoundedContext> {
            self.0.iter().find(|c| c.name() == name)
        }
    }

    fn contexts() -> Contexts {
        let mut customer = BoundedContext::new("customer").unwrap();
        customer.add_aggregate(Aggregate::new("customer", "customers").unwrap());
        customer.add_aggregate(Aggregate::new("customer", "addresses").unwrap());
        Contexts(vec![customer, BoundedContext::new("policy").unwrap()])
    }

    fn strategy(dependencies: Vec<ServiceDependency>) -> TopologyRelationshipStrategy {
        let reader = FixedTopology {
            directory: PathBuf::from("/srv/app"),
            dependencies,
        };
        TopologyRelationshipStrategy::new("/srv/app", Arc::new(reader))
    }

    #[test]
    fn test_dependency_becomes_relationship() {
        let relationships = strategy(vec![ServiceDependency::new("policy", "customer")])
            .discover_relationships(&contexts())
            .unwrap();
        assert_eq!(relationships.len(), 1);
        let relationship = &relationships[0];
        assert_eq!(relationship.upstream(), "customer");
        assert_eq!(relationship.downstream(), "policy");
        assert_eq!(relationship.exposed_aggregates(), &["customers", "addresses"]);
        assert_eq!(relationship.comment(), Some(EXPOSE_ALL_COMMENT));
    }

    #[test]
    fn test_upstream_without_aggregates_has_no_comment() {
        let relationships = strategy(vec![ServiceDependency::new("customer", "policy")])
            .discover_relationships(&contexts())
            .unwrap();
        assert!(relationships[0].exposed_aggregates().is_empty());
        assert_eq!(relationships[0].comment(), None);
    }

    #[test]
    fn test_unknown_services_are_skipped() {
        let relationships = strategy(vec![
            ServiceDependency::new("policy", "database"),
            ServiceDependency::new("gateway", "customer"),
        ])
        .discover_relationships(&contexts())
        .unwrap();
        assert!(relationships.is_empty());
    }

    #[test]
    fn test_reader_failure_is_reported() {
        let strategy = TopologyRelationshipStrategy::new(
            "/elsewhere",
            Arc::new(FixedTopology {
                directory: PathBuf::from("/srv/app"),
                dependencies: vec![],
            }),
        );
        let err = strategy.discover_relationships(&contexts()).unwrap_err();
        assert!(matches!(err, DiscoveryError::Topology(_)));
    }
}
