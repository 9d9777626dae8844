//! Upstream/downstream relationships between Bounded Contexts

use super::bounded_context::BoundedContext;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Upstream-downstream relationship.
///
/// Keeps the names of the upstream's aggregates at creation time so that
/// exposed aggregates can be checked for ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    upstream: String,
    downstream: String,
    #[serde(skip)]
    upstream_aggregates: Vec<String>,
    exposed_aggregates: Vec<String>,
    comment: Option<String>,
}

impl Relationship {
    pub fn new(upstream: &BoundedContext, downstream: &BoundedContext) -> Self {
        Self {
            upstream: upstream.name().to_string(),
            downstream: downstream.name().to_string(),
            upstream_aggregates: upstream
                .aggregates()
                .iter()
                .map(|a| a.name().to_string())
                .collect(),
            exposed_aggregates: Vec::new(),
            comment: None,
        }
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    pub fn downstream(&self) -> &str {
        &self.downstream
    }

    pub fn exposed_aggregates(&self) -> &[String] {
        &self.exposed_aggregates
    }

    /// Comment explaining how the exposed aggregates were chosen
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// Expose an aggregate of the upstream context.
    pub fn add_exposed_aggregate(&mut self, aggregate: &str) -> Result<(), DomainError> {
        if !self.upstream_aggregates.iter().any(|a| a == aggregate) {
            return Err(DomainError::AggregateNotInUpstream {
                aggregate: aggregate.to_string(),
                upstream: self.upstream.clone(),
            });
        }
        if !self.exposed_aggregates.iter().any(|a| a == aggregate) {
            self.exposed_aggregates.push(aggregate.to_string());
        }
        Ok(())
    }

    /// Expose every aggregate of the upstream; returns how many are exposed.
    pub fn expose_all_aggregates(&mut self) -> usize {
        for aggregate in &self.upstream_aggregates {
            if !self.exposed_aggregates.contains(aggregate) {
                self.exposed_aggregates.push(aggregate.clone());
            }
        }
        self.exposed_aggregates.len()
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.upstream == other.upstream && self.downstream == other.downstream
    }
}

impl Eq for Relationship {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactical::Aggregate;

    fn upstream() -> BoundedContext {
        let mut context = BoundedContext::new("Customer").unwrap();
        context.add_aggregate(Aggregate::new("Customer", "customers").unwrap());
        context.add_aggregate(Aggregate::new("Customer", "addresses").unwrap());
        context
    }

    #[test]
    fn test_exposed_aggregate_must_be_owned_by_upstream() {
        let downstream = BoundedContext::new("Policy").unwrap();
        let mut relationship = Relationship::new(&upstream(), &downstream);
        let err = relationship.add_exposed_aggregate("policies").unwrap_err();
        assert_eq!(
            err,
            DomainError::AggregateNotInUpstream {
                aggregate: "policies".to_string(),
                upstream: "Customer".to_string()
            }
        );
        relationship.add_exposed_aggregate("customers").unwrap();
        assert_eq!(relationship.exposed_aggregates(), &["customers".to_string()]);
    }

    #[test]
    fn test_expose_all_aggregates() {
        let downstream = BoundedContext::new("Policy").unwrap();
        let mut relationship = Relationship::new(&upstream(), &downstream);
        relationship.add_exposed_aggregate("addresses").unwrap();
        assert_eq!(relationship.expose_all_aggregates(), 2);
        assert_eq!(relationship.exposed_aggregates(), &["addresses", "customers"]);
    }

    #[test]
    fn test_equality_by_endpoints() {
        let downstream = BoundedContext::new("Policy").unwrap();
        let mut first = Relationship::new(&upstream(), &downstream);
        first.set_comment("first");
        let second = Relationship::new(&upstream(), &downstream);
        assert_eq!(first, second);
        assert_ne!(first, Relationship::new(&downstream, &upstream()));
    }
}
