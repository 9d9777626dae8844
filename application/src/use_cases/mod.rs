//! Use cases
//!
//! - [`discover_context_map`] runs the registered strategies and merges their results
//! - [`export_context_map`] converts the discovered map to CML and writes it

pub mod discover_context_map;
pub mod export_context_map;
