//! Normalized changelog model and the parsers that produce it
//!
//! Upstream tools publish release notes in two shapes: a markdown
//! CHANGELOG with one header per version, or GitHub Releases whose bodies
//! are free-form markdown. Both are normalized into [`ChangelogEntry`].

pub mod markdown;
pub mod release_body;
pub mod version;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One release of one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Normalized version string (e.g. "2.0.70")
    pub version: String,
    /// Release timestamp, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_at: Option<DateTime<Utc>>,
    /// Display name of the tool, set by aggregate views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Named groups of changes, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    /// Changes outside any section
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
}

impl ChangelogEntry {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            released_at: None,
            source: None,
            sections: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// True when the entry carries neither sections nor ungrouped changes
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.changes.is_empty()
    }
}

/// A named group of changes within a release (e.g. "TUI")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub changes: Vec<String>,
}

/// Drop later entries whose version was already seen, keeping the first.
pub fn retain_first_versions(entries: &mut Vec<ChangelogEntry>) {
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.version.clone()));
}

/// Find the entry with exactly this version.
pub fn find_version<'a>(
    entries: &'a [ChangelogEntry],
    version: &str,
) -> Option<&'a ChangelogEntry> {
    entries.iter().find(|entry| entry.version == version)
}
