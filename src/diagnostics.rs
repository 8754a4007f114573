//! Operator-facing diagnostics.
//!
//! Reports go to stdout. Tracing output goes to stderr so it never interleaves
//! with a table. Pipeline failures are printed as labeled lines next to the
//! reports and also logged.

use std::fmt::Display;
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset: only warnings and errors.
const DEFAULT_FILTER: &str = "warn";

/// Install the stderr tracing subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (e.g. from a test harness) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// Print a pipeline failure under `label` and log it.
///
/// A failed write to `out` is returned so the caller can decide whether
/// output is still worth producing.
pub fn report_failure<W: Write>(out: &mut W, label: &str, err: &dyn Display) -> io::Result<()> {
    tracing::warn!(label, error = %err, "pipeline failed");
    writeln!(out, "{}: {}", label, err)
}
