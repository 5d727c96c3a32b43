//! Markdown CHANGELOG parsing
//!
//! Splits a document into version spans using a caller-supplied header
//! pattern. Capture group 1 is the version; an optional group 2 holds a
//! `YYYY-MM-DD` release date embedded in the header.

use super::ChangelogEntry;
use chrono::{DateTime, NaiveDate, Utc};
use regex::{Regex, RegexBuilder};

/// Compile a version-header pattern with line anchors enabled.
///
/// `^` and `$` match at line boundaries, and `\r\n` line endings are
/// treated as line terminators.
pub fn compile_header_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .crlf(true)
        .build()
}

/// Parse a markdown changelog into entries in document order.
///
/// Returns an empty list when no header matches.
pub fn parse_changelog(content: &str, header: &Regex) -> Vec<ChangelogEntry> {
    let matches: Vec<_> = header
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let version = caps.get(1)?.as_str().trim();
            if version.is_empty() {
                return None;
            }
            let released_at = caps.get(2).and_then(|d| parse_date(d.as_str()));
            Some((whole.start(), whole.end(), version.to_string(), released_at))
        })
        .collect();

    let mut entries = Vec::with_capacity(matches.len());
    for (i, (_, header_end, version, released_at)) in matches.iter().enumerate() {
        let span_end = matches
            .get(i + 1)
            .map(|(next_start, ..)| *next_start)
            .unwrap_or(content.len());

        let mut entry = ChangelogEntry::new(version.clone());
        entry.released_at = *released_at;
        entry.changes = parse_changes(&content[*header_end..span_end]);
        entries.push(entry);
    }

    entries
}

/// Collect `- ` bullet lines from a version span, marker stripped.
pub fn parse_changes(span: &str) -> Vec<String> {
    span.lines()
        .filter_map(|line| line.trim().strip_prefix("- "))
        .map(str::to_string)
        .collect()
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
