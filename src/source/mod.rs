//! Input collaborators: where the raw text and rows come from.
//!
//! The core never spawns processes or opens sockets itself; it is handed a
//! snapshot string, a line iterator, or a list of rows from these.

pub mod database;
pub mod logfile;
pub mod ps;

pub use database::{ActivitySource, MysqlSource};
pub use logfile::{LogLines, open_log};
pub use ps::{ProcessSampler, PsSampler};
