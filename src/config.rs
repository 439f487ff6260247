//! Sweep configuration.
//!
//! JSON shape (every field optional):
//! {
//!   "num_sweep_steps": 20,
//!   "step_size": 5000,
//!   "start_value": 0,
//!   "trial_count": 3
//! }
//!
//! The x value of sweep step `i` is `start_value + i * step_size`.

use crate::error::{AggregateError, AggregateResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest accepted sweep; bounds the accumulator table allocation.
pub const MAX_SWEEP_STEPS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Bins per algorithm.
    pub num_sweep_steps: usize,
    /// X-axis units per step.
    pub step_size: u64,
    /// X value of step 0.
    pub start_value: u64,
    /// Divisor for every average, regardless of how many trials were seen.
    pub trial_count: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            num_sweep_steps: 20,
            step_size: 5000,
            start_value: 0,
            trial_count: 3,
        }
    }
}

impl SweepConfig {
    pub fn load_json(path: impl AsRef<Path>) -> AggregateResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AggregateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| {
            AggregateError::InvalidConfig(format!("{}: {}", path.display(), e))
        })
    }

    pub fn validate(&self) -> AggregateResult<()> {
        if self.num_sweep_steps == 0 {
            return Err(AggregateError::InvalidConfig(
                "num_sweep_steps must be at least 1".to_string(),
            ));
        }
        if self.step_size == 0 {
            return Err(AggregateError::InvalidConfig(
                "step_size must be at least 1".to_string(),
            ));
        }
        if self.trial_count == 0 {
            return Err(AggregateError::InvalidConfig(
                "trial_count must be at least 1".to_string(),
            ));
        }
        if self.num_sweep_steps > MAX_SWEEP_STEPS {
            return Err(AggregateError::InvalidConfig(format!(
                "num_sweep_steps {} exceeds the maximum of {}",
                self.num_sweep_steps, MAX_SWEEP_STEPS
            )));
        }

        let last_step = (self.num_sweep_steps - 1) as u64;
        last_step
            .checked_mul(self.step_size)
            .and_then(|span| span.checked_add(self.start_value))
            .ok_or_else(|| {
                AggregateError::InvalidConfig(format!(
                    "x value of step {} overflows: start_value {} + {} * step_size {}",
                    last_step, self.start_value, last_step, self.step_size
                ))
            })?;
        Ok(())
    }

    /// X value plotted for a sweep step. Cannot overflow for a validated
    /// config and `step < num_sweep_steps`.
    pub fn x_for_step(&self, step: usize) -> u64 {
        self.start_value + step as u64 * self.step_size
    }

    /// Record pairs a complete log is expected to hold.
    pub fn expected_pairs(&self) -> usize {
        self.num_sweep_steps
            .saturating_mul(self.trial_count as usize)
    }
}

/// Sweeps run by the benchmark harness variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// Remove 0..=95000 servers in increments of 5000 (20 steps). The
    /// remove-server harness sweeps 0..=100000, i.e. 21 steps; its logs need
    /// `num_sweep_steps = 21`.
    #[default]
    RemoveServers,
    /// Insert 100000..2000000 items in increments of 100000.
    Insertion,
    /// Random inserts with occasional server removals, 100000..2000000 actions.
    RandomActions,
}

impl Preset {
    pub fn sweep(self) -> SweepConfig {
        match self {
            Preset::RemoveServers => SweepConfig::default(),
            Preset::Insertion | Preset::RandomActions => SweepConfig {
                num_sweep_steps: 20,
                step_size: 100_000,
                start_value: 100_000,
                trial_count: 3,
            },
        }
    }

    pub fn x_label(self) -> &'static str {
        match self {
            Preset::RemoveServers => "Servers removed",
            Preset::Insertion => "Items inserted",
            Preset::RandomActions => "Actions performed",
        }
    }
}
