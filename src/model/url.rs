use crate::record::{CombinedLogParser, LogRequestRecord};
use std::collections::HashMap;

/// Substring the stock log report keeps.
pub const DEFAULT_URL_FILTER: &str = "index.php";

/// Hit counters for one URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlStats {
    pub count: u64,
    /// Status code -> hits, in order of first occurrence.
    pub status_codes: Vec<(String, u64)>,
}

impl UrlStats {
    /// Count one hit answered with `status`.
    pub fn record(&mut self, status: &str) {
        self.count += 1;
        match self.status_codes.iter_mut().find(|(code, _)| code == status) {
            Some((_, n)) => *n += 1,
            None => self.status_codes.push((status.to_string(), 1)),
        }
    }

    pub fn status_count(&self, status: &str) -> u64 {
        self.status_codes
            .iter()
            .find(|(code, _)| code == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// `200:3, 404:1`
    pub fn status_summary(&self) -> String {
        self.status_codes
            .iter()
            .map(|(code, n)| format!("{}:{}", code, n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Which URLs the log report keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlFilter {
    Substring(String),
    All,
}

impl Default for UrlFilter {
    fn default() -> Self {
        UrlFilter::Substring(DEFAULT_URL_FILTER.to_string())
    }
}

impl UrlFilter {
    pub fn matches(&self, url: &str) -> bool {
        match self {
            UrlFilter::Substring(needle) => url.contains(needle.as_str()),
            UrlFilter::All => true,
        }
    }

    /// Short name used in the report title.
    pub fn label(&self) -> &str {
        match self {
            UrlFilter::Substring(needle) => needle,
            UrlFilter::All => "all",
        }
    }
}

/// URL -> stats, iterated in order of first occurrence.
#[derive(Debug, Clone, Default)]
pub struct UrlAggregate {
    entries: Vec<(String, UrlStats)>,
    index: HashMap<String, usize>,
}

impl UrlAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats for `url`, inserted zeroed if this is its first hit.
    pub fn entry(&mut self, url: &str) -> &mut UrlStats {
        let idx = match self.index.get(url) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((url.to_string(), UrlStats::default()));
                self.index.insert(url.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, url: &str) -> Option<&UrlStats> {
        self.index.get(url).map(|&idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UrlStats)> {
        self.entries.iter().map(|(url, stats)| (url.as_str(), stats))
    }

    /// Sum of hits over every URL.
    pub fn total_hits(&self) -> u64 {
        self.entries.iter().map(|(_, s)| s.count).sum()
    }

    pub fn into_entries(self) -> Vec<(String, UrlStats)> {
        self.entries
    }
}

/// What happened to the lines of one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogScanSummary {
    pub lines: u64,
    pub rejected: u64,
    pub filtered_out: u64,
    pub accepted: u64,
}

/// Fold access log lines into per-URL stats in a single pass.
///
/// Lines that do not parse are counted and dropped. Parsed lines that `include`
/// refuses are counted as filtered out. `lines` is consumed lazily, so a
/// streaming reader never has to hold the whole log.
pub fn aggregate_requests<I, S, P>(
    lines: I,
    parser: &CombinedLogParser,
    include: P,
) -> (UrlAggregate, LogScanSummary)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: Fn(&LogRequestRecord) -> bool,
{
    let mut agg = UrlAggregate::new();
    let mut summary = LogScanSummary::default();

    for (lineno, line) in lines.into_iter().enumerate() {
        summary.lines += 1;

        let rec = match parser.parse(line.as_ref()) {
            Ok(rec) => rec,
            Err(reason) => {
                summary.rejected += 1;
                tracing::trace!(line = lineno + 1, %reason, "skipping access log line");
                continue;
            }
        };

        if !include(&rec) {
            summary.filtered_out += 1;
            continue;
        }

        summary.accepted += 1;
        agg.entry(&rec.url).record(&rec.status_code);
    }

    (agg, summary)
}

/// [`aggregate_requests`] with a [`UrlFilter`] on the request URL.
pub fn aggregate_matching<I, S>(
    lines: I,
    parser: &CombinedLogParser,
    filter: &UrlFilter,
) -> (UrlAggregate, LogScanSummary)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate_requests(lines, parser, |rec| filter.matches(&rec.url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(url: &str, status: &str) -> String {
        format!(r#"1.1.1.1 - - [t] "GET {} HTTP/1.1" {} 512"#, url, status)
    }

    #[test]
    fn counts_only_filtered_urls() {
        let mut lines = vec![line("/index.php?a=1", "200"); 3];
        lines.extend(vec![line("/other.php", "200"); 2]);

        let parser = CombinedLogParser::new().unwrap();
        let (agg, summary) = aggregate_matching(&lines, &parser, &UrlFilter::default());

        assert_eq!(agg.len(), 1);
        let stats = agg.get("/index.php?a=1").unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.status_codes, vec![("200".to_string(), 3)]);
        assert!(agg.get("/other.php").is_none());
        assert_eq!(
            summary,
            LogScanSummary {
                lines: 5,
                rejected: 0,
                filtered_out: 2,
                accepted: 3
            }
        );
    }

    #[test]
    fn status_counts_sum_to_hits() {
        let lines = [
            line("/index.php", "200"),
            line("/index.php", "404"),
            "garbage".to_string(),
            line("/index.php", "200"),
            line("/index.php", "500"),
            line("/index.php?x", "200"),
        ];
        let parser = CombinedLogParser::new().unwrap();
        let (agg, summary) = aggregate_matching(&lines, &parser, &UrlFilter::default());

        for (_, stats) in agg.iter() {
            let sum: u64 = stats.status_codes.iter().map(|(_, n)| n).sum();
            assert_eq!(sum, stats.count);
        }
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.accepted, agg.total_hits());

        let stats = agg.get("/index.php").unwrap();
        assert_eq!(stats.status_summary(), "200:2, 404:1, 500:1");
        assert_eq!(stats.status_count("404"), 1);
        assert_eq!(stats.status_count("301"), 0);
    }

    #[test]
    fn urls_are_case_sensitive_and_kept_in_encounter_order() {
        let lines = [
            line("/b/index.php", "200"),
            line("/a/index.php", "200"),
            line("/B/index.php", "200"),
            line("/a/index.php", "200"),
        ];
        let parser = CombinedLogParser::new().unwrap();
        let (agg, _) = aggregate_matching(&lines, &parser, &UrlFilter::default());

        let urls: Vec<&str> = agg.iter().map(|(u, _)| u).collect();
        assert_eq!(urls, vec!["/b/index.php", "/a/index.php", "/B/index.php"]);
    }

    #[test]
    fn custom_predicate_and_all_filter() {
        let lines = [line("/api/users", "200"), line("/api/users", "201")];
        let parser = CombinedLogParser::new().unwrap();

        let (agg, _) = aggregate_requests(&lines, &parser, |rec| rec.status_code == "201");
        assert_eq!(agg.get("/api/users").map(|s| s.count), Some(1));

        let (agg, _) = aggregate_matching(&lines, &parser, &UrlFilter::All);
        assert_eq!(agg.get("/api/users").map(|s| s.count), Some(2));
        assert_eq!(UrlFilter::All.label(), "all");
    }
}
