//! Discover Context Map use case
//!
//! Runs the registered discovery strategies in order and merges their
//! results into one Context Map.

use crate::ports::progress::{DiscoveryProgressNotifier, NoProgress, StrategyStage};
use crate::strategies::names::{BoundedContextNameMapping, IdentityNameMapping};
use crate::strategies::{
    BoundedContextDiscoveryStrategy, BoundedContextLookup, DiscoveryError, DiscoveryRun,
    RelationshipDiscoveryStrategy,
};
use discovery_domain::{BoundedContext, ContextMap};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that abort a discovery run
#[derive(Error, Debug)]
pub enum DiscoverContextMapError {
    #[error("Bounded context discovery '{strategy}' failed: {source}")]
    BoundedContextStrategy {
        strategy: String,
        #[source]
        source: DiscoveryError,
    },
}

/// A relationship strategy that failed without aborting the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyFailure {
    pub strategy: String,
    pub message: String,
}

/// Outcome of a discovery run
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub context_map: ContextMap,
    /// Relationship strategies that failed; their partial results are dropped
    pub failures: Vec<StrategyFailure>,
}

impl DiscoveryReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Orchestrates bounded-context and relationship discovery.
///
/// The identity name mapping is always tried first when looking up
/// Bounded Contexts by name.
pub struct ContextMapDiscoverer {
    bounded_context_strategies: Vec<Box<dyn BoundedContextDiscoveryStrategy>>,
    relationship_strategies: Vec<Box<dyn RelationshipDiscoveryStrategy>>,
    name_mappings: Vec<Box<dyn BoundedContextNameMapping>>,
}

impl Default for ContextMapDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextMapDiscoverer {
    pub fn new() -> Self {
        Self {
            bounded_context_strategies: Vec::new(),
            relationship_strategies: Vec::new(),
            name_mappings: vec![Box::new(IdentityNameMapping)],
        }
    }

    pub fn with_bounded_context_strategy(
        mut self,
        strategy: impl BoundedContextDiscoveryStrategy + 'static,
    ) -> Self {
        self.bounded_context_strategies.push(Box::new(strategy));
        self
    }

    pub fn with_relationship_strategy(
        mut self,
        strategy: impl RelationshipDiscoveryStrategy + 'static,
    ) -> Self {
        self.relationship_strategies.push(Box::new(strategy));
        self
    }

    pub fn with_name_mapping(mut self, mapping: impl BoundedContextNameMapping + 'static) -> Self {
        self.name_mappings.push(Box::new(mapping));
        self
    }

    pub fn add_bounded_context_strategy(&mut self, strategy: Box<dyn BoundedContextDiscoveryStrategy>) {
        self.bounded_context_strategies.push(strategy);
    }

    pub fn add_relationship_strategy(&mut self, strategy: Box<dyn RelationshipDiscoveryStrategy>) {
        self.relationship_strategies.push(strategy);
    }

    pub fn add_name_mapping(&mut self, mapping: Box<dyn BoundedContextNameMapping>) {
        self.name_mappings.push(mapping);
    }

    pub fn strategy_count(&self) -> usize {
        self.bounded_context_strategies.len() + self.relationship_strategies.len()
    }

    /// Find a Bounded Context of `map` by name, trying each name mapping in order.
    pub fn lookup_bounded_context<'m>(&self, map: &'m ContextMap, name: &str) -> Option<&'m BoundedContext> {
        self.name_mappings
            .iter()
            .find_map(|mapping| map.bounded_context(&mapping.map_name(name)))
    }

    /// Execute discovery with default (no-op) progress
    pub fn discover(&self) -> Result<DiscoveryReport, DiscoverContextMapError> {
        self.discover_with_progress(&NoProgress)
    }

    /// Execute discovery with progress callbacks
    pub fn discover_with_progress(
        &self,
        progress: &dyn DiscoveryProgressNotifier,
    ) -> Result<DiscoveryReport, DiscoverContextMapError> {
        let mut run = DiscoveryRun::new();
        let mut map = ContextMap::new();

        for strategy in &self.bounded_context_strategies {
            let stage = StrategyStage::BoundedContexts;
            progress.on_strategy_start(stage, strategy.id());
            let contexts = match strategy.discover_bounded_contexts(&mut run) {
                Ok(contexts) => contexts,
                Err(source) => {
                    progress.on_strategy_failed(stage, strategy.id(), &source.to_string());
                    return Err(DiscoverContextMapError::BoundedContextStrategy {
                        strategy: strategy.id().to_string(),
                        source,
                    });
                }
            };
            debug!(strategy = strategy.id(), contexts = contexts.len(), "Bounded context strategy finished");
            progress.on_strategy_complete(stage, strategy.id(), contexts.len());
            map.add_bounded_contexts(contexts);
        }

        let mut failures = Vec::new();
        for strategy in &self.relationship_strategies {
            let stage = StrategyStage::Relationships;
            progress.on_strategy_start(stage, strategy.id());
            match self.run_relationship_strategy(strategy.as_ref(), &mut map) {
                Ok(added) => progress.on_strategy_complete(stage, strategy.id(), added),
                Err(err) => {
                    error!(strategy = strategy.id(), error = %err, "Relationship discovery failed");
                    progress.on_strategy_failed(stage, strategy.id(), &err.to_string());
                    failures.push(StrategyFailure {
                        strategy: strategy.id().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        progress.on_discovery_complete();
        info!(
            bounded_contexts = map.bounded_contexts().len(),
            relationships = map.relationships().len(),
            failures = failures.len(),
            "Discovery finished"
        );
        Ok(DiscoveryReport {
            context_map: map,
            failures,
        })
    }

    /// Discover and add the relationships of one strategy; all or nothing.
    fn run_relationship_strategy(
        &self,
        strategy: &dyn RelationshipDiscoveryStrategy,
        map: &mut ContextMap,
    ) -> Result<usize, DiscoveryError> {
        let relationships = {
            let lookup = MappedLookup {
                discoverer: self,
                map: &*map,
            };
            strategy.discover_relationships(&lookup)?
        };

        let mut staged = map.clone();
        for relationship in &relationships {
            staged.add_relationship(relationship.clone())?;
        }
        *map = staged;
        Ok(relationships.len())
    }
}

/// Lookup over a Context Map through the discoverer's name mappings
struct MappedLookup<'a> {
    discoverer: &'a ContextMapDiscoverer,
    map: &'a ContextMap,
}

impl BoundedContextLookup for MappedLookup<'_> {
    fn lookup_bounded_context(&self, name: &str) -> Option<&BoundedContext> {
        self.discoverer.lookup_bounded_context(self.map, name)
    }
}
