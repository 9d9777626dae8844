//! Progress notification port
//!
//! Defines the interface for reporting progress while discovery strategies run.

use std::fmt;

/// Which stage a strategy belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyStage {
    BoundedContexts,
    Relationships,
}

impl StrategyStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyStage::BoundedContexts => "bounded contexts",
            StrategyStage::Relationships => "relationships",
        }
    }
}

impl fmt::Display for StrategyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback for progress updates during discovery
///
/// Implementations live in the presentation layer.
pub trait DiscoveryProgressNotifier: Send + Sync {
    /// Called before a strategy runs
    fn on_strategy_start(&self, stage: StrategyStage, strategy: &str);

    /// Called after a strategy succeeded; `discovered` counts contexts or relationships
    fn on_strategy_complete(&self, stage: StrategyStage, strategy: &str, discovered: usize);

    /// Called when a strategy failed
    fn on_strategy_failed(&self, _stage: StrategyStage, _strategy: &str, _error: &str) {}

    /// Called once all strategies ran
    fn on_discovery_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DiscoveryProgressNotifier for NoProgress {
    fn on_strategy_start(&self, _stage: StrategyStage, _strategy: &str) {}
    fn on_strategy_complete(&self, _stage: StrategyStage, _strategy: &str, _discovered: usize) {}
}
