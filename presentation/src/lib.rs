//! Presentation layer for context-discovery
//!
//! This crate contains the CLI definition, output formatters
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, SummaryFormat};
pub use output::console::{ConsoleFormatter, DiscoverySummary};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
