//! Bounded Context discovery from tagged types.

use super::{BoundedContextDiscoveryStrategy, DiscoveryError, DiscoveryRun};
use crate::ports::type_scanner::TypeMetadataScanner;
use discovery_domain::BoundedContext;
use std::sync::Arc;
use tracing::debug;

/// Every type in scope carrying the tag becomes a Bounded Context named after
/// the type, without aggregates.
pub struct AnnotatedTypeDiscoveryStrategy {
    scope: String,
    tag: String,
    technology: String,
    scanner: Arc<dyn TypeMetadataScanner>,
}

impl AnnotatedTypeDiscoveryStrategy {
    pub fn new(
        scope: impl Into<String>,
        tag: impl Into<String>,
        technology: impl Into<String>,
        scanner: Arc<dyn TypeMetadataScanner>,
    ) -> Self {
        Self {
            scope: scope.into(),
            tag: tag.into(),
            technology: technology.into(),
            scanner,
        }
    }
}

impl BoundedContextDiscoveryStrategy for AnnotatedTypeDiscoveryStrategy {
    fn id(&self) -> &str {
        "tagged-types"
    }

    fn discover_bounded_contexts(
        &self,
        _run: &mut DiscoveryRun,
    ) -> Result<Vec<BoundedContext>, DiscoveryError> {
        let contexts = self
            .scanner
            .find_tagged_types(&self.scope, &self.tag)
            .iter()
            .map(|ty| -> Result<BoundedContext, DiscoveryError> {
                let mut context = BoundedContext::new(ty.simple_name())?;
                if !self.technology.is_empty() {
                    context = context.with_technology(self.technology.clone());
                }
                Ok(context)
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(tag = %self.tag, contexts = contexts.len(), "Discovered bounded contexts from tagged types");
        Ok(contexts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::type_scanner::{TypeDescriptor, TypeTag};
    use crate::strategies::test_support::InMemoryScanner;

    fn tagged(name: &str, tag: &str) -> TypeDescriptor {
        TypeDescriptor {
            tags: vec![TypeTag::new(tag)],
            ..TypeDescriptor::new(name)
        }
    }

    #[test]
    fn test_tagged_types_become_contexts() {
        let scanner = InMemoryScanner::new(vec![
            tagged("com.acme.billing.BillingContext", "BoundedContext"),
            tagged("com.acme.shipping.ShippingContext", "BoundedContext"),
            tagged("com.acme.shipping.Helper", "Component"),
            tagged("org.other.ForeignContext", "BoundedContext"),
        ]);
        let strategy =
            AnnotatedTypeDiscoveryStrategy::new("com.acme", "BoundedContext", "Java", Arc::new(scanner));
        let contexts = strategy
            .discover_bounded_contexts(&mut DiscoveryRun::new())
            .unwrap();

        let names: Vec<_> = contexts.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["BillingContext", "ShippingContext"]);
        assert!(contexts.iter().all(|c| c.technology() == Some("Java")));
        assert!(contexts.iter().all(|c| c.aggregates().is_empty()));
    }
}
