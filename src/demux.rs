//! Routing of the interleaved trial stream into (algorithm, sweep step) slots.
//!
//! The harness prints one Baseline record followed by one Alternative record
//! for every sweep step, a full sweep at a time, once per trial. Tagging is by
//! position only; record contents never influence routing.

use crate::log::NumberedRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Standard ring-based consistent hashing.
    Baseline,
    /// CuckooRings.
    Alternative,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Baseline, Algorithm::Alternative];

    pub fn index(self) -> usize {
        match self {
            Algorithm::Baseline => 0,
            Algorithm::Alternative => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Baseline => "Standard Consistent Hashing",
            Algorithm::Alternative => "CuckooRings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Time,
    Cost,
    MaxLoad,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Time, Metric::Cost, Metric::MaxLoad];

    pub fn index(self) -> usize {
        match self {
            Metric::Time => 0,
            Metric::Cost => 1,
            Metric::MaxLoad => 2,
        }
    }

    /// Machine-readable name, as used in JSON and CSV output.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Time => "time",
            Metric::Cost => "cost",
            Metric::MaxLoad => "max_load",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Time => "Time",
            Metric::Cost => "Cost",
            Metric::MaxLoad => "Max Load",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::Time => "Elapsed time (s)",
            Metric::Cost => "Cost (mean squared load)",
            Metric::MaxLoad => "Max load",
        }
    }
}

/// Where a record at a given stream position belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSlot {
    pub algorithm: Algorithm,
    pub step: usize,
}

/// Slot for the record at 1-based stream `position`.
///
/// Odd positions are Baseline, even positions Alternative. Both advance one
/// sweep step per pair and wrap every `num_sweep_steps` pairs.
pub fn slot_for_position(position: usize, num_sweep_steps: usize) -> SweepSlot {
    debug_assert!(position >= 1);
    debug_assert!(num_sweep_steps >= 1);

    if position % 2 == 1 {
        SweepSlot {
            algorithm: Algorithm::Baseline,
            step: ((position - 1) / 2) % num_sweep_steps,
        }
    } else {
        SweepSlot {
            algorithm: Algorithm::Alternative,
            step: ((position - 2) / 2) % num_sweep_steps,
        }
    }
}

/// A matched Baseline/Alternative pair for one sweep step of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordPair {
    pub step: usize,
    pub baseline: NumberedRecord,
    pub alternative: NumberedRecord,
}

/// Pairs records as they stream in.
///
/// A Baseline record is held until its Alternative partner arrives, so an
/// unmatched trailing record never reaches the accumulators.
#[derive(Debug)]
pub struct Demultiplexer {
    num_sweep_steps: usize,
    position: usize,
    pending: Option<NumberedRecord>,
}

impl Demultiplexer {
    pub fn new(num_sweep_steps: usize) -> Self {
        Self {
            num_sweep_steps,
            position: 0,
            pending: None,
        }
    }

    /// Feed the next record; returns a pair once both halves are present.
    pub fn push(&mut self, rec: NumberedRecord) -> Option<RecordPair> {
        self.position += 1;
        let slot = slot_for_position(self.position, self.num_sweep_steps);

        match slot.algorithm {
            Algorithm::Baseline => {
                self.pending = Some(rec);
                None
            }
            Algorithm::Alternative => {
                // Positions alternate, so an even position always has a
                // held Baseline record from the position before it.
                let baseline = self.pending.take()?;
                Some(RecordPair {
                    step: slot.step,
                    baseline,
                    alternative: rec,
                })
            }
        }
    }

    /// Records consumed so far.
    pub fn records_seen(&self) -> usize {
        self.position
    }

    /// End of stream: the unmatched Baseline record, if the count was odd.
    pub fn finish(self) -> Option<NumberedRecord> {
        self.pending
    }
}
