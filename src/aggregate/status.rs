//! Per-source status summary: latest and previous version, freshness and
//! release cadence.

use super::latest::window_start;
use super::parallel::SourceEntries;
use super::relative::{approx_interval, time_ago};
use crate::changelog::ChangelogEntry;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// Shown where a value cannot be derived
pub const PLACEHOLDER: &str = "-";

/// Cadence looks at no more than this many dated entries
const CADENCE_SAMPLE: usize = 10;

/// One row of the status view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub source: String,
    pub latest_version: String,
    pub previous_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<DateTime<Utc>>,
    pub updated: String,
    pub recent: bool,
    pub cadence: String,
}

/// Build status rows, most recently updated first.
///
/// `depth` caps how many entries per source are considered. Sources with
/// no entries produce no row.
pub fn status_rows(
    results: &[SourceEntries],
    now: DateTime<Utc>,
    window: Duration,
    depth: usize,
) -> Vec<StatusRow> {
    let cutoff = window_start(now, window);
    let mut rows: Vec<StatusRow> = results
        .iter()
        .filter_map(|source| {
            let entries = &source.entries[..source.entries.len().min(depth)];
            let latest = entries.first()?;
            let released_at = latest.released_at;

            Some(StatusRow {
                source: source.display_name.clone(),
                latest_version: latest.version.clone(),
                previous_version: entries
                    .get(1)
                    .map(|e| e.version.clone())
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                released_at,
                updated: released_at
                    .map(|t| time_ago(t, now))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                recent: released_at.is_some_and(|t| t >= cutoff),
                cadence: average_interval(entries)
                    .map(approx_interval)
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            })
        })
        .collect();

    rows.sort_by(compare_rows);
    rows
}

/// Mean gap between consecutive dated entries, newest first.
///
/// Uses up to the first ten dated entries; `None` with fewer than two.
pub fn average_interval(entries: &[ChangelogEntry]) -> Option<Duration> {
    let dates: Vec<DateTime<Utc>> = entries
        .iter()
        .filter_map(|e| e.released_at)
        .take(CADENCE_SAMPLE)
        .collect();
    if dates.len() < 2 {
        return None;
    }

    let total: Duration = dates
        .windows(2)
        .map(|pair| pair[0] - pair[1])
        .fold(Duration::zero(), |acc, gap| acc + gap);
    Some(total / (dates.len() as i32 - 1))
}

/// Dated rows newest first, then undated rows; ties by name.
fn compare_rows(a: &StatusRow, b: &StatusRow) -> Ordering {
    match (a.released_at, b.released_at) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.source.cmp(&b.source)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.source.cmp(&b.source),
    }
}
