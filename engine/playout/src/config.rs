//! Playout evaluation configuration parameters.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

use crate::strategy::Strategy;

/// How many playouts an evaluation may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialBudget {
    /// Run exactly this many playouts. Deterministic given a fixed seed.
    Fixed(u32),

    /// Run until a wall-clock deadline. The deadline is checked between
    /// playouts, never mid-playout, so the last playout may overrun it.
    /// Results are not reproducible across runs.
    Timeout(Duration),
}

/// How playouts are distributed across candidate moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialAllocation {
    /// Round-robin over candidates, so per-candidate trial counts differ
    /// by at most one.
    #[default]
    EvenSplit,

    /// Draw the candidate for each trial uniformly at random.
    RandomDraw,
}

/// Configuration for Monte Carlo playout evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayoutConfig {
    /// Trial budget for one evaluation.
    pub budget: TrialBudget,

    /// How trials are spread over the candidate moves.
    pub allocation: TrialAllocation,

    /// Number of parallel workers. Zero is treated as one.
    pub workers: usize,

    /// Decision stages, tried in order. Later stages only run when every
    /// earlier stage declines to decide.
    pub strategies: Vec<Strategy>,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            budget: TrialBudget::Fixed(2_000),
            allocation: TrialAllocation::EvenSplit,
            workers: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            strategies: vec![
                Strategy::WinningMoveLookahead,
                Strategy::NonLosingFilter,
                Strategy::RandomPlayout,
            ],
        }
    }
}

impl PlayoutConfig {
    /// Create a small, single-threaded, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            budget: TrialBudget::Fixed(64),
            allocation: TrialAllocation::EvenSplit,
            workers: 1,
            strategies: vec![Strategy::RandomPlayout],
        }
    }

    /// Builder pattern: set the trial budget.
    pub fn with_budget(mut self, budget: TrialBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Builder pattern: set the allocation policy.
    pub fn with_allocation(mut self, allocation: TrialAllocation) -> Self {
        self.allocation = allocation;
        self
    }

    /// Builder pattern: set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builder pattern: set the strategy pipeline.
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayoutConfig::default();
        assert_eq!(config.budget, TrialBudget::Fixed(2_000));
        assert_eq!(config.allocation, TrialAllocation::EvenSplit);
        assert!(config.workers >= 1);
        assert_eq!(config.strategies.len(), 3);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PlayoutConfig::default()
            .with_budget(TrialBudget::Fixed(100))
            .with_workers(2)
            .with_strategies(vec![Strategy::RandomPlayout]);

        assert_eq!(config.budget, TrialBudget::Fixed(100));
        assert_eq!(config.workers, 2);
        assert_eq!(config.strategies, vec![Strategy::RandomPlayout]);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: PlayoutConfig = toml::from_str(
            r#"
            workers = 4
            budget = { fixed = 500 }
            "#,
        )
        .unwrap();

        assert_eq!(config.workers, 4);
        assert_eq!(config.budget, TrialBudget::Fixed(500));
        // omitted fields fall back to defaults
        assert_eq!(config.allocation, TrialAllocation::EvenSplit);
        assert_eq!(config.strategies.len(), 3);
    }

    #[test]
    fn test_deserialize_timeout_budget() {
        let config: PlayoutConfig = toml::from_str(
            r#"
            budget = { timeout = { secs = 1, nanos = 0 } }
            allocation = "random_draw"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.budget,
            TrialBudget::Timeout(Duration::from_secs(1))
        );
        assert_eq!(config.allocation, TrialAllocation::RandomDraw);
    }
}
