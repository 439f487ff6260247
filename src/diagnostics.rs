//! Non-fatal conditions surfaced during an aggregation pass.
//!
//! Every warning is both logged when it is detected and kept on the report,
//! so callers can inspect what happened without scraping stderr.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The record count was odd; the unmatched final record was dropped.
    TruncatedStream { dropped_line: usize },

    /// No records were read. All averages are zero.
    EmptyInput,

    /// The stream did not hold exactly `steps × trials` record pairs.
    /// Averages are still divided by the configured trial count.
    TrialCountMismatch {
        configured: u32,
        observed_sweeps: usize,
        partial_steps: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedStream { dropped_line } => write!(
                f,
                "odd record count: dropped unmatched record at line {}",
                dropped_line
            ),
            Self::EmptyInput => write!(f, "input contained no records; averages are zero"),
            Self::TrialCountMismatch {
                configured,
                observed_sweeps,
                partial_steps,
            } => write!(
                f,
                "expected {} full sweeps but saw {} (+{} steps of a partial sweep); \
                 averages still divide by {}",
                configured, observed_sweeps, partial_steps, configured
            ),
        }
    }
}

/// Log a warning and hand it back for collection.
pub fn surface(warning: Warning) -> Warning {
    warn(&warning);
    warning
}

pub fn warn(msg: impl fmt::Display) {
    tracing::warn!("{}", msg);
}
