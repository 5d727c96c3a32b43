//! Changelog source adapters
//!
//! Each upstream tool is one [`ChangelogSource`]. Two families exist:
//! raw markdown changelogs and GitHub Releases listings. Both return
//! entries newest first.

pub mod github;
pub mod markdown;
pub mod registry;

use crate::changelog::ChangelogEntry;
use crate::error::Error;
use crate::fetch::Fetcher;

pub use github::GithubReleasesSource;
pub use markdown::MarkdownSource;
pub use registry::Registry;

/// Common trait for changelog sources
#[async_trait::async_trait]
pub trait ChangelogSource: Send + Sync {
    /// Stable identifier used on the command line (e.g. "claude")
    fn key(&self) -> &str;

    /// Human-readable tool name (e.g. "Claude Code")
    fn display_name(&self) -> &str;

    /// Fetch and normalize this source's entries, newest first
    async fn fetch(&self, fetcher: &Fetcher) -> Result<Vec<ChangelogEntry>, Error>;
}
