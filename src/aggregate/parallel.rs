//! Concurrent fetching across every registered source
//!
//! One future per source, awaited together. Partial failures are
//! tolerated as long as at least one source returns entries. If all
//! sources fail, the whole fetch fails.

use crate::changelog::ChangelogEntry;
use crate::error::{AggregateError, Error};
use crate::fetch::Fetcher;
use crate::sources::Registry;
use tracing::{debug, info, warn};

/// Entries fetched from one source
#[derive(Debug, Clone)]
pub struct SourceEntries {
    /// Source key (e.g. "codex")
    pub key: String,
    /// Source display name (e.g. "Codex CLI")
    pub display_name: String,
    /// Entries, newest first
    pub entries: Vec<ChangelogEntry>,
}

/// A single source failure
#[derive(Debug)]
pub struct SourceFailure {
    pub key: String,
    pub error: String,
}

/// Result of fetching all sources
#[derive(Debug)]
pub struct FetchAllResult {
    /// Sources that returned entries, in registry order
    pub successes: Vec<SourceEntries>,
    /// Sources that failed, in registry order
    pub failures: Vec<SourceFailure>,
}

impl FetchAllResult {
    /// Check if at least one source succeeded
    pub fn has_results(&self) -> bool {
        !self.successes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Fetch every registered source concurrently.
///
/// Each failure is logged as a warning and recorded; it never aborts the
/// other fetches. Returns an error only when the registry is empty or no
/// source succeeded.
pub async fn fetch_all(registry: &Registry, fetcher: &Fetcher) -> Result<FetchAllResult, Error> {
    if registry.is_empty() {
        return Err(Error::Aggregate(AggregateError::NoSources));
    }

    info!("Fetching {} sources concurrently", registry.len());

    let futures: Vec<_> = registry
        .sources()
        .iter()
        .map(|source| {
            debug!("Spawning fetch for {}", source.key());
            async move {
                let result = source.fetch(fetcher).await;
                (source.as_ref(), result)
            }
        })
        .collect();

    let results = futures::future::join_all(futures).await;

    let mut successes = Vec::new();
    let mut failures = Vec::new();

    for (source, result) in results {
        match result {
            Ok(entries) => {
                debug!("{} returned {} entries", source.key(), entries.len());
                successes.push(SourceEntries {
                    key: source.key().to_string(),
                    display_name: source.display_name().to_string(),
                    entries,
                });
            }
            Err(e) => {
                warn!("{} failed ({})", source.key(), e.context());
                failures.push(SourceFailure {
                    key: source.key().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    let result = FetchAllResult {
        successes,
        failures,
    };

    if !result.has_results() {
        return Err(Error::Aggregate(AggregateError::AllSourcesFailed {
            sources: result.failures.iter().map(|f| f.key.clone()).collect(),
        }));
    }

    info!(
        "Fetched {}/{} sources",
        result.success_count(),
        result.success_count() + result.failure_count()
    );

    Ok(result)
}
