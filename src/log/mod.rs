//! Record parsing for benchmark harness timing logs.

pub mod parse;
pub mod record;

pub use parse::{RecordReader, parse_line};
pub use record::{NumberedRecord, RawRecord};
