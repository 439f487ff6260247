//! Comparison model: turn averaged bins into aligned (x, y) series.

use crate::aggregate::TrialAggregator;
use crate::config::SweepConfig;
use crate::demux::{Algorithm, Metric};
use crate::diagnostics::Warning;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: u64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub algorithm: Algorithm,
    pub label: String,
    pub points: Vec<Point>,
}

/// Both algorithms' series for one metric, index-aligned by sweep step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonDataset {
    pub metric: Metric,
    pub title: String,
    pub y_label: String,
    pub baseline: Series,
    pub alternative: Series,
}

impl ComparisonDataset {
    pub fn series(&self, algorithm: Algorithm) -> &Series {
        match algorithm {
            Algorithm::Baseline => &self.baseline,
            Algorithm::Alternative => &self.alternative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub sweep: SweepConfig,
    pub x_label: String,
    /// Records consumed, including a dropped unmatched tail.
    pub records: usize,
    /// Time, cost and max load, in that order.
    pub datasets: Vec<ComparisonDataset>,
    pub warnings: Vec<Warning>,
}

impl ComparisonReport {
    pub fn dataset(&self, metric: Metric) -> &ComparisonDataset {
        &self.datasets[metric.index()]
    }
}

/// Build the three comparison datasets from a finished aggregation pass.
pub fn build_comparison(agg: &TrialAggregator, sweep: &SweepConfig) -> Vec<ComparisonDataset> {
    Metric::ALL
        .iter()
        .map(|&metric| ComparisonDataset {
            metric,
            title: format!(
                "{} Comparison of Consistent Hashing and CuckooRings",
                metric.label()
            ),
            y_label: metric.axis_label().to_string(),
            baseline: build_series(agg, sweep, Algorithm::Baseline, metric),
            alternative: build_series(agg, sweep, Algorithm::Alternative, metric),
        })
        .collect()
}

fn build_series(
    agg: &TrialAggregator,
    sweep: &SweepConfig,
    algorithm: Algorithm,
    metric: Metric,
) -> Series {
    let points = (0..agg.num_sweep_steps())
        .map(|step| Point {
            x: sweep.x_for_step(step),
            y: agg.average(algorithm, step, metric),
        })
        .collect();

    Series {
        algorithm,
        label: algorithm.label().to_string(),
        points,
    }
}
