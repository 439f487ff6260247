//! Aggregates benchmark harness logs comparing standard consistent hashing
//! against CuckooRings into plot-ready comparison series.

pub mod aggregate;
pub mod config;
pub mod demux;
pub mod diagnostics;
pub mod error;
pub mod log;
pub mod model;
pub mod pipeline;
pub mod render;

pub use config::{Preset, SweepConfig};
pub use demux::{Algorithm, Metric};
pub use error::{AggregateError, AggregateResult};
pub use model::{ComparisonDataset, ComparisonReport, Point, Series};
pub use pipeline::{ReportOptions, aggregate_file, aggregate_reader};

pub type Result<T> = anyhow::Result<T>;
