//! Aggregation model: turn parsed records into the groups the reports rank.
//!
//! Processes are their own group, so collecting them is a pass-through.
//! Access log requests are grouped by exact URL.

pub mod session;
pub mod url;

pub use session::{SessionRow, active_sessions};
pub use url::{
    DEFAULT_URL_FILTER, LogScanSummary, UrlAggregate, UrlFilter, UrlStats, aggregate_matching,
    aggregate_requests,
};

use crate::record::{ProcessRecord, parse_process_line};

/// Records accepted from one process snapshot.
#[derive(Debug, Clone, Default)]
pub struct ProcessListing {
    pub records: Vec<ProcessRecord>,
    pub rejected: usize,
}

/// Which metric a process table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMetric {
    Cpu,
    Memory,
}

impl ProcessMetric {
    pub fn value(self, rec: &ProcessRecord) -> f64 {
        match self {
            ProcessMetric::Cpu => rec.cpu_percent,
            ProcessMetric::Memory => rec.mem_percent,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ProcessMetric::Cpu => "CPU usage",
            ProcessMetric::Memory => "Memory usage",
        }
    }
}

/// Parse a full `ps` snapshot. The first line is the header and is never parsed.
pub fn collect_processes(snapshot: &str) -> ProcessListing {
    let mut listing = ProcessListing::default();

    for (lineno, line) in snapshot.lines().enumerate().skip(1) {
        match parse_process_line(line) {
            Ok(rec) => listing.records.push(rec),
            Err(reason) => {
                listing.rejected += 1;
                tracing::trace!(line = lineno + 1, %reason, "skipping process line");
            }
        }
    }

    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_is_skipped_and_bad_rows_dropped() {
        let snapshot = "  PID USER %CPU %MEM COMMAND\n\
                        1 root 0.0 0.1 /sbin/init\n\
                        2 alice 75.3 4.2 python app.py\n\
                        3 bob 1.0\n\
                        4 carol x 2.0 vim\n";
        let listing = collect_processes(snapshot);

        let pids: Vec<&str> = listing.records.iter().map(|r| r.pid.as_str()).collect();
        assert_eq!(pids, vec!["1", "2"]);
        assert_eq!(listing.rejected, 2);
        assert_eq!(listing.records[1].cpu_percent, 75.3);
        assert_eq!(listing.records[1].mem_percent, 4.2);
    }

    #[test]
    fn header_alone_or_empty_yields_nothing() {
        assert!(collect_processes("").records.is_empty());
        assert!(collect_processes("PID USER %CPU %MEM COMMAND\n").records.is_empty());
    }

    #[test]
    fn first_line_is_dropped_even_when_it_looks_like_data() {
        let listing = collect_processes("9 root 1.0 1.0 init\n10 root 2.0 2.0 sshd");
        assert_eq!(listing.records.len(), 1);
        assert_eq!(listing.records[0].pid, "10");
    }
}
