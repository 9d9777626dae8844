//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod context_map_writer;
pub mod contract_reader;
pub mod progress;
pub mod topology_reader;
pub mod type_scanner;
