//! Command runners behind the CLI.
//!
//! Each runner is handed its collaborators and an output sink. A failing
//! pipeline prints its labeled error and the next requested pipeline still runs;
//! only a failed write to the sink ends a runner early.

use crate::Result;
use crate::config::{DbCredentials, DiagConfig, MysqlConfig};
use crate::diagnostics::report_failure;
use crate::error::InspectError;
use crate::model::{UrlFilter, active_sessions, aggregate_matching, collect_processes};
use crate::rank::top_k;
use crate::record::CombinedLogParser;
use crate::render::{render_process_report, render_session_table, render_url_table};
use crate::source::{ActivitySource, ProcessSampler, open_log};
use std::io::{self, Write};
use std::path::PathBuf;

const PS_FAILURE: &str = "Error executing ps command";
const GENERIC_FAILURE: &str = "Error";
const DB_FAILURE: &str = "MySQL Error";

/// Sample processes once and print the CPU and memory tables.
pub fn run_processes<S, W>(sampler: &S, command_width: usize, out: &mut W) -> io::Result<()>
where
    S: ProcessSampler + ?Sized,
    W: Write,
{
    let snapshot = match sampler.sample() {
        Ok(text) => text,
        Err(err) => {
            report_failure(out, PS_FAILURE, &err)?;
            String::new()
        }
    };

    let listing = collect_processes(&snapshot);
    tracing::debug!(
        records = listing.records.len(),
        rejected = listing.rejected,
        "parsed process snapshot"
    );

    out.write_all(render_process_report(&listing.records, command_width).as_bytes())
}

/// Inputs of the web reporter that come straight from the command line.
#[derive(Debug, Clone, Default)]
pub struct WebOptions {
    pub log: Option<PathBuf>,
    pub mysql_user: Option<String>,
    pub mysql_password: Option<String>,
}

/// Run the access log analysis and/or the database inspection.
///
/// `connect` is only called when both credentials are present.
pub fn run_web<W, C, A>(
    opts: &WebOptions,
    cfg: &DiagConfig,
    connect: C,
    out: &mut W,
) -> io::Result<()>
where
    W: Write,
    C: FnOnce(&DbCredentials, &MysqlConfig) -> std::result::Result<A, InspectError>,
    A: ActivitySource,
{
    if let Some(path) = &opts.log {
        match open_log(path) {
            Ok(lines) => match log_report(lines, &cfg.url_filter(), cfg.top) {
                Ok(table) => out.write_all(table.as_bytes())?,
                Err(err) => report_failure(out, GENERIC_FAILURE, &err)?,
            },
            Err(err) => report_failure(out, GENERIC_FAILURE, &err)?,
        }
    }

    match DbCredentials::from_flags(opts.mysql_user.clone(), opts.mysql_password.clone()) {
        Ok(Some(creds)) => {
            let report = connect(&creds, &cfg.mysql)
                .and_then(|mut source| session_report(&mut source, cfg.query_width));
            match report {
                Ok(table) => out.write_all(table.as_bytes())?,
                Err(err) => report_failure(out, DB_FAILURE, &err)?,
            }
        }
        Ok(None) => {}
        Err(err) => report_failure(out, GENERIC_FAILURE, &err)?,
    }

    Ok(())
}

/// Aggregate access log lines per URL and render the top `top` by hits.
pub fn log_report<I, S>(lines: I, filter: &UrlFilter, top: usize) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parser = CombinedLogParser::new()?;
    let (agg, summary) = aggregate_matching(lines, &parser, filter);
    tracing::debug!(
        lines = summary.lines,
        rejected = summary.rejected,
        filtered_out = summary.filtered_out,
        accepted = summary.accepted,
        urls = agg.len(),
        "scanned access log"
    );

    let ranked = top_k(agg.into_entries(), top, |(_, stats)| stats.count);
    Ok(render_url_table(&ranked, filter))
}

/// Fetch sessions, drop idle ones and render the rest in server order.
pub fn session_report<A>(
    source: &mut A,
    query_width: usize,
) -> std::result::Result<String, InspectError>
where
    A: ActivitySource + ?Sized,
{
    let sessions = active_sessions(source.sessions()?);
    Ok(render_session_table(&sessions, query_width))
}
