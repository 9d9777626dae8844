//! Context Map aggregate root

use super::bounded_context::BoundedContext;
use super::relationship::Relationship;
use crate::core::error::DomainError;
use crate::tactical::{DomainObject, DomainObjectRef};
use crate::util::upsert;
use serde::{Deserialize, Serialize};

/// The result of a discovery run: Bounded Contexts and their relationships.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextMap {
    bounded_contexts: Vec<BoundedContext>,
    relationships: Vec<Relationship>,
}

impl ContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a Bounded Context. One with the same name is replaced (last write wins).
    pub fn add_bounded_context(&mut self, context: BoundedContext) -> bool {
        upsert(&mut self.bounded_contexts, context)
    }

    pub fn add_bounded_contexts(&mut self, contexts: impl IntoIterator<Item = BoundedContext>) {
        for context in contexts {
            self.add_bounded_context(context);
        }
    }

    /// Add a relationship between two contexts of this map.
    ///
    /// Fails when either end is not part of the map. A relationship with the
    /// same endpoints replaces the earlier one.
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<(), DomainError> {
        if self.bounded_context(relationship.upstream()).is_none() {
            return Err(DomainError::UpstreamNotInMap(relationship.upstream().to_string()));
        }
        if self.bounded_context(relationship.downstream()).is_none() {
            return Err(DomainError::DownstreamNotInMap(
                relationship.downstream().to_string(),
            ));
        }
        upsert(&mut self.relationships, relationship);
        Ok(())
    }

    pub fn bounded_contexts(&self) -> &[BoundedContext] {
        &self.bounded_contexts
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn bounded_context(&self, name: &str) -> Option<&BoundedContext> {
        self.bounded_contexts.iter().find(|c| c.name() == name)
    }

    pub fn resolve(&self, handle: &DomainObjectRef) -> Option<&DomainObject> {
        self.bounded_context(&handle.context)?.resolve(handle)
    }

    pub fn is_empty(&self) -> bool {
        self.bounded_contexts.is_empty()
    }
}
