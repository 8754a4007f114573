//! perfdiag: sample process and web/database activity and rank what is hungry or slow.
//!
//! Both reporters share one shape: raw text lines are parsed into records,
//! records are grouped and counted, and the groups are ranked and rendered
//! as fixed-width text tables.

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod rank;
pub mod record;
pub mod render;
pub mod source;

pub type Result<T> = anyhow::Result<T>;
