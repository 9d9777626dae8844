//! Strategic design: Bounded Contexts, relationships and the Context Map

pub mod bounded_context;
pub mod context_map;
pub mod relationship;

pub use bounded_context::BoundedContext;
pub use context_map::ContextMap;
pub use relationship::Relationship;
