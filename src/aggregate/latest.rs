//! Releases published within a trailing window, across all sources

use super::parallel::SourceEntries;
use crate::changelog::ChangelogEntry;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Newest entry of each source if it was released within `window` of `now`.
///
/// Entries without a timestamp never qualify. Survivors are stamped with
/// their source's display name and sorted newest first.
pub fn recent_releases(
    results: &[SourceEntries],
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<ChangelogEntry> {
    let cutoff = window_start(now, window);

    let mut recent: Vec<ChangelogEntry> = results
        .iter()
        .filter_map(|source| {
            let newest = source.entries.first()?;
            let Some(released_at) = newest.released_at else {
                debug!("{}: {} is undated", source.key, newest.version);
                return None;
            };
            if released_at < cutoff {
                debug!("{}: {} is older than the window", source.key, newest.version);
                return None;
            }
            let mut entry = newest.clone();
            entry.source = Some(source.display_name.clone());
            Some(entry)
        })
        .collect();

    recent.sort_by(|a, b| {
        b.released_at
            .cmp(&a.released_at)
            .then_with(|| a.source.cmp(&b.source))
    });
    recent
}

/// Earliest instant inside the window, saturating at the minimum timestamp
pub(crate) fn window_start(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 20, 12, 0, 0).unwrap()
    }

    fn source(name: &str, entries: Vec<ChangelogEntry>) -> SourceEntries {
        SourceEntries {
            key: name.to_lowercase(),
            display_name: name.to_string(),
            entries,
        }
    }

    fn entry(version: &str, released_at: Option<DateTime<Utc>>) -> ChangelogEntry {
        let mut entry = ChangelogEntry::new(version);
        entry.released_at = released_at;
        entry
    }

    #[test]
    fn test_filters_and_sorts() {
        let now = now();
        let results = vec![
            source("Old", vec![entry("1.0.0", Some(now - Duration::hours(30)))]),
            source("Mid", vec![entry("2.0.0", Some(now - Duration::hours(5)))]),
            source("New", vec![entry("3.0.0", Some(now - Duration::minutes(10)))]),
            source("Undated", vec![entry("4.0.0", None)]),
            source("Empty", vec![]),
        ];

        let recent = recent_releases(&results, now, Duration::hours(24));
        let versions: Vec<_> = recent.iter().map(|e| e.version.as_str()).collect();
        assert_eq!(versions, vec!["3.0.0", "2.0.0"]);
        assert_eq!(recent[0].source.as_deref(), Some("New"));
        assert_eq!(recent[1].source.as_deref(), Some("Mid"));
    }

    #[test]
    fn test_only_newest_entry_considered() {
        let now = now();
        let results = vec![source(
            "Tool",
            vec![
                entry("2.0.0", None),
                entry("1.9.0", Some(now - Duration::hours(1))),
            ],
        )];

        assert!(recent_releases(&results, now, Duration::hours(24)).is_empty());
    }

    #[test]
    fn test_window_boundary_inclusive() {
        let now = now();
        let results = vec![source("Edge", vec![entry("1.0.0", Some(now - Duration::hours(24)))])];

        assert_eq!(recent_releases(&results, now, Duration::hours(24)).len(), 1);
    }

    #[test]
    fn test_oversized_window_saturates() {
        let now = now();
        let results = vec![source(
            "Ancient",
            vec![entry("0.1.0", Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()))],
        )];

        let recent = recent_releases(&results, now, Duration::MAX);
        assert_eq!(recent.len(), 1);
        assert_eq!(window_start(now, Duration::MAX), DateTime::<Utc>::MIN_UTC);
    }
}
