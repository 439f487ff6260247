//! Per-(algorithm, step, metric) accumulation of repeated trials.

use crate::demux::{Algorithm, Metric, RecordPair};
use crate::log::RawRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccumulatorBin {
    pub sum: f64,
    pub count: u32,
}

impl AccumulatorBin {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }
}

/// Accumulator table for one aggregation pass.
///
/// Averages divide by the configured trial count, not by `count`. A log that
/// is missing trials therefore understates the mean of the affected bins.
#[derive(Debug)]
pub struct TrialAggregator {
    num_sweep_steps: usize,
    trial_count: u32,
    bins: Vec<AccumulatorBin>,
    pairs: usize,
}

impl TrialAggregator {
    pub fn new(num_sweep_steps: usize, trial_count: u32) -> Self {
        let len = Algorithm::ALL.len() * num_sweep_steps * Metric::ALL.len();
        Self {
            num_sweep_steps,
            trial_count,
            bins: vec![AccumulatorBin::default(); len],
            pairs: 0,
        }
    }

    fn slot(&self, algorithm: Algorithm, step: usize, metric: Metric) -> usize {
        (algorithm.index() * self.num_sweep_steps + step) * Metric::ALL.len() + metric.index()
    }

    /// Add one record's three metrics to the bins of `(algorithm, step)`.
    pub fn add(&mut self, algorithm: Algorithm, step: usize, record: &RawRecord) {
        for metric in Metric::ALL {
            let value = metric_value(record, metric);
            let i = self.slot(algorithm, step, metric);
            self.bins[i].add(value);
        }
    }

    pub fn add_pair(&mut self, pair: &RecordPair) {
        self.add(Algorithm::Baseline, pair.step, &pair.baseline.record);
        self.add(Algorithm::Alternative, pair.step, &pair.alternative.record);
        self.pairs += 1;
    }

    pub fn bin(&self, algorithm: Algorithm, step: usize, metric: Metric) -> AccumulatorBin {
        self.bins[self.slot(algorithm, step, metric)]
    }

    pub fn average(&self, algorithm: Algorithm, step: usize, metric: Metric) -> f64 {
        self.bin(algorithm, step, metric).sum / f64::from(self.trial_count)
    }

    /// Record pairs accumulated so far.
    pub fn pairs(&self) -> usize {
        self.pairs
    }

    pub fn num_sweep_steps(&self) -> usize {
        self.num_sweep_steps
    }
}

pub fn metric_value(record: &RawRecord, metric: Metric) -> f64 {
    match metric {
        Metric::Time => record.elapsed_time,
        Metric::Cost => record.cost,
        Metric::MaxLoad => record.max_load,
    }
}
