use crate::model::{ProcessMetric, SessionRow, UrlFilter, UrlStats};
use crate::rank::rank_by;
use crate::record::ProcessRecord;
use crate::render::truncate_chars;

const RULE_WIDTH: usize = 40;

/// Longest command shown in a process row.
pub const COMMAND_WIDTH: usize = 80;

/// Render one process table, rows in the order given.
///
/// Columns: right-aligned pid (7), user (10), cpu and mem to one decimal with a
/// trailing `%`, then the command cut to `command_width` characters.
pub fn render_process_table(
    records: &[ProcessRecord],
    metric: ProcessMetric,
    command_width: usize,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!(
        "\n{rule}\nProcesses sorted by {} (descending)\n{rule}\n",
        metric.title()
    );
    out.push_str(&format!(
        "{:>7} {:<10} {:>6} {:>6} COMMAND\n",
        "PID", "USER", "CPU%", "MEM%"
    ));
    for p in records {
        out.push_str(&format!(
            "{:>7} {:<10} {:>6.1}% {:>6.1}% {}\n",
            p.pid,
            p.user,
            p.cpu_percent,
            p.mem_percent,
            truncate_chars(&p.command, command_width)
        ));
    }

    out
}

/// Both process tables over one snapshot: by CPU, then by memory.
pub fn render_process_report(records: &[ProcessRecord], command_width: usize) -> String {
    if records.is_empty() {
        return "No processes found\n".to_string();
    }

    let mut out = String::new();
    for metric in [ProcessMetric::Cpu, ProcessMetric::Memory] {
        let ranked = rank_by(records.to_vec(), |p| metric.value(p));
        out.push_str(&render_process_table(&ranked, metric, command_width));
    }
    out
}

/// Render the per-URL hit table, rows in the order given.
pub fn render_url_table(entries: &[(String, UrlStats)], filter: &UrlFilter) -> String {
    let mut out = format!("Apache Log Analysis for {} Requests:\n", filter.label());
    out.push_str(&format!(
        "{:<80} {:<10} {:<15}\n",
        "URL", "Total Hits", "Status Codes"
    ));
    for (url, stats) in entries {
        out.push_str(&format!(
            "{:<80} {:<10} {:<15}\n",
            url,
            stats.count,
            stats.status_summary()
        ));
    }

    out
}

/// Render active database sessions; the query is cut to `query_width` characters.
pub fn render_session_table(sessions: &[SessionRow], query_width: usize) -> String {
    let mut out = String::from("\nActive MySQL Processes:\n");
    out.push_str(&format!(
        "{:<8} {:<12} {:<6} {:<12} {:<60}\n",
        "ID", "User", "Time", "State", "Query"
    ));
    for s in sessions {
        out.push_str(&format!(
            "{:<8} {:<12} {:<6} {:<12} {:<60}\n",
            s.id,
            s.user,
            s.elapsed_seconds,
            s.state.as_deref().unwrap_or(""),
            truncate_chars(s.query.as_deref().unwrap_or(""), query_width)
        ));
    }

    out
}
