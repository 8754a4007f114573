//! Fixed-width text rendering for the reports.

pub mod text;

pub use text::{
    COMMAND_WIDTH, render_process_report, render_process_table, render_session_table,
    render_url_table,
};

/// Cut `s` to at most `max` characters. Never splits a character.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
