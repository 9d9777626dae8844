//! Domain error types

use thiserror::Error;

/// Errors raised while constructing the entity graph.
///
/// These are invalid-construction errors: callers must not swallow them,
/// the graph would otherwise end up in a state that cannot be serialized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("The name of a {0} must not be empty")]
    EmptyName(&'static str),

    #[error("A primitive type needs a non-empty type name")]
    EmptyPrimitiveType,

    #[error("A reference must point to a domain object, but '{0}' is a primitive type")]
    PrimitiveReference(String),

    #[error("The upstream Bounded Context '{0}' of this relationship is not part of the Context Map")]
    UpstreamNotInMap(String),

    #[error("The downstream Bounded Context '{0}' of this relationship is not part of the Context Map")]
    DownstreamNotInMap(String),

    #[error("The Aggregate '{aggregate}' is not part of the upstream Bounded Context '{upstream}'")]
    AggregateNotInUpstream { aggregate: String, upstream: String },

    #[error("The domain object '{0}' belongs to another aggregate")]
    ForeignDomainObject(String),

    #[error("Unknown domain object '{0}'")]
    UnknownDomainObject(String),
}

impl DomainError {
    /// Check if this error is caused by an incomplete Context Map
    pub fn is_membership_violation(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamNotInMap(_)
                | DomainError::DownstreamNotInMap(_)
                | DomainError::AggregateNotInUpstream { .. }
        )
    }
}

/// Fail with [`DomainError::EmptyName`] when `name` is blank.
pub(crate) fn require_name(name: String, what: &'static str) -> Result<String, DomainError> {
    if name.trim().is_empty() {
        Err(DomainError::EmptyName(what))
    } else {
        Ok(name)
    }
}
