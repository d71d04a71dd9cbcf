//! Multi-source log parsing and severity/pattern aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::{debug, info, warn};

use lens_config::{ErrorPattern, LogSource};

/// Severity parsed from the bracketed level token.
///
/// Matching is exact and case-sensitive; anything else is preserved as
/// `Other` so it still counts toward the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Other(String),
}

impl LogLevel {
    fn from_token(token: &str) -> Self {
        match token {
            "ERROR" => LogLevel::Error,
            "WARNING" => LogLevel::Warning,
            "INFO" => LogLevel::Info,
            other => LogLevel::Other(other.to_string()),
        }
    }
}

/// A parsed log line tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    pub kind: String,
}

/// Aggregated view over all log sources.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogSummary {
    pub total_entries: u64,
    pub error_count: u64,
    pub warning_count: u64,
    pub info_count: u64,
    pub error_percentage: f64,
    pub warning_percentage: f64,
    pub info_percentage: f64,
    /// Entry count per source kind.
    pub source_breakdown: BTreeMap<String, u64>,
    /// Entry count per matched issue pattern.
    pub issue_counts: BTreeMap<String, u64>,
}

impl LogSummary {
    /// Entries whose level token was not ERROR/WARNING/INFO.
    pub fn other_count(&self) -> u64 {
        self.total_entries - self.error_count - self.warning_count - self.info_count
    }

    /// One-line summary for the dashboard payload.
    pub fn summary_line(&self) -> String {
        format!(
            "{} entries, {} errors, {} warnings",
            self.total_entries, self.error_count, self.warning_count
        )
    }

    /// Issue patterns ordered by count descending, ties by name.
    pub fn top_issues(&self) -> Vec<(&str, u64)> {
        let mut issues: Vec<_> = self
            .issue_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        issues.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        issues
    }

    /// Natural-language summary fed to the text analysis service.
    pub fn text_summary(&self) -> String {
        if self.total_entries == 0 {
            return "No log data available for analysis.".to_string();
        }

        let sources = self
            .source_breakdown
            .iter()
            .map(|(kind, count)| format!("{} {} entries", count, kind))
            .collect::<Vec<_>>()
            .join(", ");

        let top_issue = self
            .top_issues()
            .first()
            .map(|(name, count)| {
                format!(
                    "The most common problem category is {} with {} occurrences.",
                    name, count
                )
            })
            .unwrap_or_else(|| "No recurring problem categories were detected.".to_string());

        format!(
            "System log analysis across multiple sources shows {} log entries with {} errors \
             and {} warnings. The error rate is {:.1}%. Log sources analyzed: {}. {}",
            self.total_entries,
            self.error_count,
            self.warning_count,
            self.error_percentage,
            sources,
            top_issue,
        )
    }
}

/// Parses raw log lines and aggregates severity and issue statistics.
pub struct LogAggregator {
    patterns: Vec<ErrorPattern>,
    line_re: Regex,
}

impl LogAggregator {
    /// Create an aggregator with the given issue patterns (in priority
    /// order; the first match wins per entry).
    pub fn new(patterns: Vec<ErrorPattern>) -> Self {
        let line_re = Regex::new(r"^(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2}:\d{2})\s+\[(\w+)\]\s+(.*)$")
            .expect("log line regex is valid");
        Self { patterns, line_re }
    }

    /// Read every source and aggregate all parseable entries.
    ///
    /// A missing or unreadable source is skipped with a warning; when
    /// nothing could be read at all, an all-zero summary is returned
    /// rather than an error.
    pub fn analyze(&self, sources: &[LogSource]) -> LogSummary {
        info!("Loading logs from {} source(s)", sources.len());

        let mut entries = Vec::new();
        for source in sources {
            match std::fs::read_to_string(&source.path) {
                Ok(content) => {
                    let before = entries.len();
                    for line in content.lines() {
                        if let Some(entry) = self.parse_line(line, source) {
                            entries.push(entry);
                        }
                    }
                    debug!(
                        "Loaded {} entries from {}",
                        entries.len() - before,
                        source.description
                    );
                }
                Err(e) => {
                    warn!("Skipping log source {:?}: {}", source.path, e);
                }
            }
        }

        if entries.is_empty() {
            warn!("No log entries to analyze");
            return LogSummary::default();
        }

        self.summarize(&entries)
    }

    /// Parse one line in the `YYYY-MM-DD HH:MM:SS [LEVEL] message`
    /// format. Lines that do not match are dropped.
    pub fn parse_line(&self, line: &str, source: &LogSource) -> Option<LogEntry> {
        let captures = self.line_re.captures(line.trim())?;
        let timestamp = NaiveDateTime::parse_from_str(
            &format!("{} {}", &captures[1], &captures[2]),
            "%Y-%m-%d %H:%M:%S",
        )
        .ok()?;

        Some(LogEntry {
            timestamp,
            level: LogLevel::from_token(&captures[3]),
            message: captures[4].to_string(),
            source: source.path.display().to_string(),
            kind: source.kind.clone(),
        })
    }

    fn summarize(&self, entries: &[LogEntry]) -> LogSummary {
        let total = entries.len() as u64;
        let mut error_count = 0u64;
        let mut warning_count = 0u64;
        let mut info_count = 0u64;
        let mut source_breakdown: BTreeMap<String, u64> = BTreeMap::new();

        for entry in entries {
            match entry.level {
                LogLevel::Error => error_count += 1,
                LogLevel::Warning => warning_count += 1,
                LogLevel::Info => info_count += 1,
                LogLevel::Other(_) => {}
            }
            *source_breakdown.entry(entry.kind.clone()).or_insert(0) += 1;
        }

        let percentage = |count: u64| {
            if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            }
        };

        LogSummary {
            total_entries: total,
            error_count,
            warning_count,
            info_count,
            error_percentage: percentage(error_count),
            warning_percentage: percentage(warning_count),
            info_percentage: percentage(info_count),
            source_breakdown,
            issue_counts: self.attribute_patterns(entries),
        }
    }

    /// Bucket ERROR and WARNING entries into issue categories.
    ///
    /// The first configured pattern with any keyword appearing as a
    /// case-insensitive substring of the message wins; an entry is
    /// never counted twice.
    fn attribute_patterns(&self, entries: &[LogEntry]) -> BTreeMap<String, u64> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();

        for entry in entries {
            if !matches!(entry.level, LogLevel::Error | LogLevel::Warning) {
                continue;
            }
            let message = entry.message.to_lowercase();

            for pattern in &self.patterns {
                let matched = pattern
                    .keywords
                    .iter()
                    .any(|keyword| message.contains(&keyword.to_lowercase()));
                if matched {
                    *counts.entry(pattern.name.clone()).or_insert(0) += 1;
                    break;
                }
            }
        }

        counts
    }
}
