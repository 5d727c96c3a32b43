//! GitHub Releases source
//!
//! Reads one page of the releases API. Tags are normalized by stripping a
//! known prefix, bodies are split into sections, and `published_at`
//! becomes the release timestamp.

use crate::changelog::release_body::parse_release_body;
use crate::changelog::version::normalize_tag;
use crate::changelog::{retain_first_versions, ChangelogEntry};
use crate::error::{Error, LookupError};
use crate::fetch::Fetcher;
use crate::sources::ChangelogSource;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

/// GitHub API response for a single release.
#[derive(Debug, Deserialize)]
struct GitHubRelease {
    /// Tag name (e.g., "rust-v0.46.0")
    tag_name: String,
    /// Release body (markdown)
    #[serde(default)]
    body: Option<String>,
    /// Published timestamp, null for drafts
    #[serde(default)]
    published_at: Option<String>,
}

pub struct GithubReleasesSource {
    key: String,
    display_name: String,
    releases_url: String,
    tag_prefixes: Vec<String>,
}

impl GithubReleasesSource {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        releases_url: impl Into<String>,
        tag_prefixes: Vec<String>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            releases_url: releases_url.into(),
            tag_prefixes,
        }
    }

    fn to_entry(&self, release: GitHubRelease) -> Option<ChangelogEntry> {
        let version = normalize_tag(&release.tag_name, &self.tag_prefixes);
        if version.is_empty() {
            debug!("{}: skipping release with empty tag", self.key);
            return None;
        }

        let (sections, changes) = parse_release_body(release.body.as_deref().unwrap_or(""));

        let mut entry = ChangelogEntry::new(version);
        entry.released_at = release.published_at.as_deref().and_then(parse_timestamp);
        entry.sections = sections;
        entry.changes = changes;
        Some(entry)
    }
}

/// Parse an RFC 3339 timestamp; empty or malformed values yield `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

#[async_trait::async_trait]
impl ChangelogSource for GithubReleasesSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    async fn fetch(&self, fetcher: &Fetcher) -> Result<Vec<ChangelogEntry>, Error> {
        let releases: Vec<GitHubRelease> = fetcher.get_json(&self.releases_url).await?;

        let mut entries: Vec<ChangelogEntry> = releases
            .into_iter()
            .filter_map(|release| self.to_entry(release))
            .collect();
        retain_first_versions(&mut entries);

        if entries.is_empty() {
            return Err(Error::Lookup(LookupError::EmptyResult(self.display_name.clone())));
        }

        info!("{}: fetched {} releases", self.key, entries.len());
        Ok(entries)
    }
}
