//! Fatal conditions of an aggregation pass.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    /// A line did not parse into exactly three numeric fields.
    #[error("malformed record at line {line}: {reason}: {content:?}")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sweep configuration: {0}")]
    InvalidConfig(String),
}

pub type AggregateResult<T> = std::result::Result<T, AggregateError>;
