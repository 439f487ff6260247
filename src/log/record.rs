use serde::Serialize;

/// One harness measurement: `elapsed_time,cost,max_load`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawRecord {
    pub elapsed_time: f64,
    pub cost: f64,
    pub max_load: f64,
}

/// A record plus the physical input line it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberedRecord {
    pub line: usize,
    pub record: RawRecord,
}
