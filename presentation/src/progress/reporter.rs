//! Progress reporting for discovery runs

use colored::Colorize;
use discovery_application::ports::progress::{DiscoveryProgressNotifier, StrategyStage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per running strategy
pub struct ProgressReporter {
    multi: MultiProgress,
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            current: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn finish(&self, message: String) {
        if let Some(pb) = self.current.lock().ok().and_then(|mut current| current.take()) {
            pb.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Display name of a stage
fn stage_label(stage: StrategyStage) -> &'static str {
    match stage {
        StrategyStage::BoundedContexts => "Bounded Contexts",
        StrategyStage::Relationships => "Relationships",
    }
}

/// What a stage counts
fn discovered_noun(stage: StrategyStage, count: usize) -> &'static str {
    match (stage, count) {
        (StrategyStage::BoundedContexts, 1) => "context",
        (StrategyStage::BoundedContexts, _) => "contexts",
        (StrategyStage::Relationships, 1) => "relationship",
        (StrategyStage::Relationships, _) => "relationships",
    }
}

impl DiscoveryProgressNotifier for ProgressReporter {
    fn on_strategy_start(&self, stage: StrategyStage, strategy: &str) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage_label(stage).to_string());
        pb.set_message(format!("{strategy}..."));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut current) = self.current.lock() {
            *current = Some(pb);
        }
    }

    fn on_strategy_complete(&self, stage: StrategyStage, strategy: &str, discovered: usize) {
        self.finish(format!(
            "{} {strategy}: {discovered} {}",
            "v".green(),
            discovered_noun(stage, discovered)
        ));
    }

    fn on_strategy_failed(&self, _stage: StrategyStage, strategy: &str, error: &str) {
        self.finish(format!("{} {strategy}: {error}", "x".red()));
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl DiscoveryProgressNotifier for SimpleProgress {
    fn on_strategy_start(&self, stage: StrategyStage, strategy: &str) {
        eprintln!("{} {} ({strategy})", "->".cyan(), stage_label(stage).bold());
    }

    fn on_strategy_complete(&self, stage: StrategyStage, strategy: &str, discovered: usize) {
        eprintln!(
            "  {} {strategy}: {discovered} {}",
            "v".green(),
            discovered_noun(stage, discovered)
        );
    }

    fn on_strategy_failed(&self, _stage: StrategyStage, strategy: &str, error: &str) {
        eprintln!("  {} {strategy} (failed): {error}", "x".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn test_discovered_noun() {
        assert_eq!(discovered_noun(StrategyStage::BoundedContexts, 1), "context");
        assert_eq!(discovered_noun(StrategyStage::BoundedContexts, 0), "contexts");
        assert_eq!(discovered_noun(StrategyStage::Relationships, 3), "relationships");
    }

    #[test]
    fn test_reporter_tracks_current_spinner() {
        let reporter = ProgressReporter {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            current: Mutex::new(None),
        };
        reporter.on_strategy_start(StrategyStage::BoundedContexts, "openapi");
        assert!(reporter.current.lock().unwrap().is_some());

        reporter.on_strategy_complete(StrategyStage::BoundedContexts, "openapi", 2);
        assert!(reporter.current.lock().unwrap().is_none());

        reporter.on_strategy_start(StrategyStage::Relationships, "docker-compose");
        reporter.on_strategy_failed(StrategyStage::Relationships, "docker-compose", "missing directory");
        assert!(reporter.current.lock().unwrap().is_none());
    }
}
