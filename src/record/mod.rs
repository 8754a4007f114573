//! Line parsers: one raw text line in, one typed record or a reject reason out.

pub mod access;
pub mod process;

pub use access::{CombinedLogParser, LogRequestRecord};
pub use process::{ProcessRecord, parse_process_line};
