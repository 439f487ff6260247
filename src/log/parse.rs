use crate::error::{AggregateError, AggregateResult};
use crate::log::record::{NumberedRecord, RawRecord};
use regex::Regex;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::LazyLock;

const FIELD_DELIMITER: char = ',';
const FIELD_COUNT: usize = 3;

// Plain decimal or scientific notation; nan and inf are rejected.
const NUMBER_RE: &str = r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$";

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBER_RE).expect("NUMBER_RE is a valid pattern"));

/// Parse one harness log line into a record.
///
/// Expected columns (comma-separated, no header):
/// elapsed_time,cost,max_load
///
/// Example:
/// 1.52,0.9981,14
pub fn parse_line(line: &str, lineno: usize) -> AggregateResult<RawRecord> {
    let malformed = |reason: String| AggregateError::MalformedRecord {
        line: lineno,
        content: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.trim().split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        )));
    }

    let mut values = [0.0f64; FIELD_COUNT];
    for (slot, field) in values.iter_mut().zip(&fields) {
        if !NUMBER.is_match(field) {
            return Err(malformed(format!("field {:?} is not a number", field)));
        }
        *slot = field
            .parse()
            .map_err(|e| malformed(format!("field {:?}: {}", field, e)))?;
    }

    let [elapsed_time, cost, max_load] = values;
    Ok(RawRecord {
        elapsed_time,
        cost,
        max_load,
    })
}

/// Streams records out of a harness log one line at a time.
///
/// Whitespace-only lines are skipped; they are not records and do not
/// advance the record position.
pub struct RecordReader<R> {
    inner: R,
    source: PathBuf,
    buf: Vec<u8>,
    lineno: usize,
    failed: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R, source: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            source: source.into(),
            buf: Vec::new(),
            lineno: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = AggregateResult<NumberedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buf.clear();
            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    self.failed = true;
                    return Some(Err(AggregateError::Io {
                        path: self.source.clone(),
                        source,
                    }));
                }
            }
            self.lineno += 1;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(text) => text.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(AggregateError::MalformedRecord {
                        line: self.lineno,
                        content: String::from_utf8_lossy(&self.buf)
                            .trim_end_matches(['\n', '\r'])
                            .to_string(),
                        reason: format!("invalid UTF-8: {}", e),
                    }));
                }
            };
            if line.trim().is_empty() {
                tracing::debug!(line = self.lineno, "skipping blank line");
                continue;
            }

            let parsed = parse_line(line, self.lineno).map(|record| NumberedRecord {
                line: self.lineno,
                record,
            });
            if parsed.is_err() {
                self.failed = true;
            }
            return Some(parsed);
        }
    }
}
