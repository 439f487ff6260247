//! One aggregation pass: parse, pair, accumulate, build.

use crate::aggregate::TrialAggregator;
use crate::config::{Preset, SweepConfig};
use crate::demux::Demultiplexer;
use crate::diagnostics::{self, Warning};
use crate::error::{AggregateError, AggregateResult};
use crate::log::RecordReader;
use crate::model::{ComparisonReport, build_comparison};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Options that only affect how the result is labeled.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub x_label: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            x_label: Preset::default().x_label().to_string(),
        }
    }
}

/// Aggregate a harness log from any buffered reader.
///
/// Memory use is bounded by the sweep size, not the log length. The first
/// malformed record aborts the pass and no report is produced.
pub fn aggregate_reader<R: BufRead>(
    reader: R,
    source: impl Into<PathBuf>,
    sweep: &SweepConfig,
    opts: &ReportOptions,
) -> AggregateResult<ComparisonReport> {
    sweep.validate()?;

    let mut demux = Demultiplexer::new(sweep.num_sweep_steps);
    let mut agg = TrialAggregator::new(sweep.num_sweep_steps, sweep.trial_count);

    for rec in RecordReader::new(reader, source) {
        if let Some(pair) = demux.push(rec?) {
            agg.add_pair(&pair);
        }
    }

    let records = demux.records_seen();
    let mut warnings = Vec::new();

    if let Some(dangling) = demux.finish() {
        warnings.push(diagnostics::surface(Warning::TruncatedStream {
            dropped_line: dangling.line,
        }));
    }

    if records == 0 {
        warnings.push(diagnostics::surface(Warning::EmptyInput));
    } else if agg.pairs() != sweep.expected_pairs() {
        warnings.push(diagnostics::surface(Warning::TrialCountMismatch {
            configured: sweep.trial_count,
            observed_sweeps: agg.pairs() / sweep.num_sweep_steps,
            partial_steps: agg.pairs() % sweep.num_sweep_steps,
        }));
    }

    tracing::info!(
        records,
        pairs = agg.pairs(),
        steps = sweep.num_sweep_steps,
        trials = sweep.trial_count,
        "aggregated benchmark log"
    );

    Ok(ComparisonReport {
        sweep: *sweep,
        x_label: opts.x_label.clone(),
        records,
        datasets: build_comparison(&agg, sweep),
        warnings,
    })
}

/// Aggregate a harness log file.
pub fn aggregate_file(
    path: impl AsRef<Path>,
    sweep: &SweepConfig,
    opts: &ReportOptions,
) -> AggregateResult<ComparisonReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AggregateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    aggregate_reader(BufReader::new(file), path, sweep, opts)
}
