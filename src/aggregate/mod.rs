//! Cross-source views
//!
//! Fetches every registered source concurrently and derives the `latest`
//! and `status` views. Final ordering is always recomputed from
//! timestamps and names, never from fetch completion order.

pub mod latest;
pub mod parallel;
pub mod relative;
pub mod status;

use crate::changelog::ChangelogEntry;
use crate::config::AggregateConfig;
use crate::error::Error;
use crate::fetch::Fetcher;
use crate::sources::Registry;
use chrono::{DateTime, Utc};

pub use latest::recent_releases;
pub use parallel::{fetch_all, FetchAllResult, SourceEntries, SourceFailure};
pub use status::{status_rows, StatusRow};

/// Outcome of an aggregate view plus the sources that were skipped
#[derive(Debug)]
pub struct Aggregated<T> {
    pub items: Vec<T>,
    pub failures: Vec<SourceFailure>,
}

/// Fetch everything and keep releases from the configured recent window
pub async fn latest(
    registry: &Registry,
    fetcher: &Fetcher,
    config: &AggregateConfig,
    now: DateTime<Utc>,
) -> Result<Aggregated<ChangelogEntry>, Error> {
    let window = config.window()?;
    let result = fetch_all(registry, fetcher).await?;
    let items = recent_releases(&result.successes, now, window);
    Ok(Aggregated {
        items,
        failures: result.failures,
    })
}

/// Fetch everything and summarize each source
pub async fn status(
    registry: &Registry,
    fetcher: &Fetcher,
    config: &AggregateConfig,
    now: DateTime<Utc>,
) -> Result<Aggregated<StatusRow>, Error> {
    let window = config.window()?;
    let result = fetch_all(registry, fetcher).await?;
    let items = status_rows(&result.successes, now, window, config.status_depth);
    Ok(Aggregated {
        items,
        failures: result.failures,
    })
}
