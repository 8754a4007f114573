//! Apache/NCSA combined log lines.

use crate::Result;
use crate::error::RejectReason;
use regex::Regex;

// Capture:
// 1) remote host   2) ident   3) auth user   4) [timestamp]
// 5) method  6) url  7) protocol  (inside the quoted request)
// 8) status  9) bytes, `-` when nothing was sent
// 10) referer  11) user agent  (combined format only, optional)
//
// Anchored at the start only: anything after the known fields is ignored.
const LOG_LINE_RE: &str = r#"^(\S+) (\S+) (\S+) \[([^\]]+)\] "(\S+) (\S+) (\S+)" (\d+) (\d+|-)(?: "([^"]*)" "([^"]*)")?"#;

/// One request line from a web server access log.
///
/// Only `url` and `status_code` feed the aggregate; the rest is carried along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequestRecord {
    pub remote_host: String,
    pub ident_user: String,
    pub auth_user: String,
    /// Raw bracketed timestamp text, unparsed.
    pub timestamp: String,
    pub method: String,
    pub url: String,
    pub protocol: String,
    pub status_code: String,
    pub byte_count: String,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
}

/// Compiled combined-log grammar, built once per scan.
#[derive(Debug, Clone)]
pub struct CombinedLogParser {
    re: Regex,
}

impl CombinedLogParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re: Regex::new(LOG_LINE_RE)?,
        })
    }

    /// Parse one access log line.
    ///
    /// Example:
    /// 1.1.1.1 - - [10/Oct/2000:13:55:36 -0700] "GET /index.php?a=1 HTTP/1.1" 200 512
    pub fn parse(&self, line: &str) -> std::result::Result<LogRequestRecord, RejectReason> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(RejectReason::Empty);
        }

        let caps = self.re.captures(line).ok_or(RejectReason::GrammarMismatch)?;
        let field = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
        let required = |i: usize| field(i).ok_or(RejectReason::GrammarMismatch);

        Ok(LogRequestRecord {
            remote_host: required(1)?,
            ident_user: required(2)?,
            auth_user: required(3)?,
            timestamp: required(4)?,
            method: required(5)?,
            url: required(6)?,
            protocol: required(7)?,
            status_code: required(8)?,
            byte_count: required(9)?,
            referer: field(10),
            user_agent: field(11),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parser() -> CombinedLogParser {
        CombinedLogParser::new().unwrap()
    }

    #[test]
    fn parses_common_log_line() {
        let rec = parser()
            .parse(r#"1.1.1.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /index.php?a=1 HTTP/1.1" 200 512"#)
            .unwrap();
        assert_eq!(
            rec,
            LogRequestRecord {
                remote_host: "1.1.1.1".to_string(),
                ident_user: "-".to_string(),
                auth_user: "frank".to_string(),
                timestamp: "10/Oct/2000:13:55:36 -0700".to_string(),
                method: "GET".to_string(),
                url: "/index.php?a=1".to_string(),
                protocol: "HTTP/1.1".to_string(),
                status_code: "200".to_string(),
                byte_count: "512".to_string(),
                referer: None,
                user_agent: None,
            }
        );
    }

    #[test]
    fn parses_combined_tail_and_dash_bytes() {
        let rec = parser()
            .parse(
                "10.0.0.2 - - [t] \"POST /wp/index.php HTTP/2.0\" 304 - \"https://example.org/\" \"curl/8.5.0\"\r\n",
            )
            .unwrap();
        assert_eq!(rec.byte_count, "-");
        assert_eq!(rec.status_code, "304");
        assert_eq!(rec.referer.as_deref(), Some("https://example.org/"));
        assert_eq!(rec.user_agent.as_deref(), Some("curl/8.5.0"));
    }

    #[test]
    fn missing_request_is_rejected() {
        assert_eq!(
            parser().parse("1.1.1.1 - - [t] 200 512"),
            Err(RejectReason::GrammarMismatch)
        );
        assert_eq!(
            parser().parse(r#"1.1.1.1 - - [t] "GET /index.php" 200 512"#),
            Err(RejectReason::GrammarMismatch)
        );
        assert_eq!(parser().parse(""), Err(RejectReason::Empty));
    }

    #[test]
    fn non_numeric_status_is_rejected() {
        assert_eq!(
            parser().parse(r#"1.1.1.1 - - [t] "GET /index.php HTTP/1.1" OK 512"#),
            Err(RejectReason::GrammarMismatch)
        );
    }
}
