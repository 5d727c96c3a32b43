//! Raw markdown CHANGELOG source
//!
//! Fetches the document, splits it by the source's version-header pattern
//! and, when the newest entry carries no date, falls back to the last
//! commit touching the file.

use crate::changelog::markdown::{compile_header_pattern, parse_changelog};
use crate::changelog::{retain_first_versions, ChangelogEntry};
use crate::error::{ConfigError, Error, LookupError};
use crate::fetch::Fetcher;
use crate::sources::ChangelogSource;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// One element of the GitHub commits API response
#[derive(Debug, Deserialize)]
struct CommitRecord {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    committer: CommitSignature,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    date: Option<String>,
}

pub struct MarkdownSource {
    key: String,
    display_name: String,
    url: String,
    header: Regex,
    commits_url: Option<String>,
}

impl MarkdownSource {
    /// Create a source, compiling its header pattern up front
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        url: impl Into<String>,
        header_pattern: &str,
        commits_url: Option<String>,
    ) -> Result<Self, Error> {
        let key = key.into();
        let header = compile_header_pattern(header_pattern).map_err(|e| {
            Error::Config(ConfigError::InvalidPattern {
                source_key: key.clone(),
                details: e.to_string(),
            })
        })?;

        Ok(Self {
            key,
            display_name: display_name.into(),
            url: url.into(),
            header,
            commits_url,
        })
    }

    /// Last commit date of the changelog file, if the history endpoint has one
    async fn last_commit_date(
        &self,
        fetcher: &Fetcher,
        commits_url: &str,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        let commits: Vec<CommitRecord> = fetcher.get_json(commits_url).await?;
        Ok(commits
            .into_iter()
            .next()
            .and_then(|c| c.commit.committer.date)
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|date| date.with_timezone(&Utc)))
    }
}

#[async_trait::async_trait]
impl ChangelogSource for MarkdownSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    async fn fetch(&self, fetcher: &Fetcher) -> Result<Vec<ChangelogEntry>, Error> {
        let content = fetcher.get_text(&self.url).await?;

        let mut entries = parse_changelog(&content, &self.header);
        retain_first_versions(&mut entries);
        if entries.is_empty() {
            return Err(Error::Lookup(LookupError::EmptyResult(self.display_name.clone())));
        }
        info!("{}: parsed {} entries", self.key, entries.len());

        if entries[0].released_at.is_none() {
            if let Some(commits_url) = &self.commits_url {
                match self.last_commit_date(fetcher, commits_url).await {
                    Ok(Some(date)) => {
                        debug!(
                            "{}: dating {} from last commit ({})",
                            self.key, entries[0].version, date
                        );
                        entries[0].released_at = Some(date);
                    }
                    Ok(None) => debug!("{}: commit history has no date", self.key),
                    Err(e) => warn!("{}: commit date lookup failed: {}", self.key, e),
                }
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let result = MarkdownSource::new("bad", "Bad", "http://x", r"^## (\d+", None);
        match result {
            Err(Error::Config(ConfigError::InvalidPattern { source_key, .. })) => {
                assert_eq!(source_key, "bad");
            }
            _ => panic!("expected InvalidPattern"),
        }
    }

    #[test]
    fn test_commit_record_shape() {
        let json = r#"[{"sha":"abc","commit":{"committer":{"name":"x","date":"2025-11-02T18:04:11Z"}}}]"#;
        let records: Vec<CommitRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(
            records[0].commit.committer.date.as_deref(),
            Some("2025-11-02T18:04:11Z")
        );
    }
}
