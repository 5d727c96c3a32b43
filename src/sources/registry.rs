//! Source registry
//!
//! Built once at startup from the built-in specs plus any configured
//! sources, then shared read-only by every command.

use crate::config::{SourceKind, SourceSpec};
use crate::error::{Error, LookupError};
use crate::sources::{ChangelogSource, GithubReleasesSource, MarkdownSource};

const CLAUDE_HEADER: &str = r"^## (\d+\.\d+\.\d+)(?:\s+\((\d{4}-\d{2}-\d{2})\))?\s*$";

/// Specs for the tools known out of the box
pub fn builtin_specs() -> Vec<SourceSpec> {
    vec![
        SourceSpec {
            key: "claude".to_string(),
            display_name: "Claude Code".to_string(),
            kind: SourceKind::Markdown {
                url: "https://raw.githubusercontent.com/anthropics/claude-code/main/CHANGELOG.md"
                    .to_string(),
                header_pattern: CLAUDE_HEADER.to_string(),
                commits_url: Some(
                    "https://api.github.com/repos/anthropics/claude-code/commits?path=CHANGELOG.md&per_page=1"
                        .to_string(),
                ),
            },
        },
        github_spec("codex", "Codex CLI", "openai/codex", &["rust-v", "v"]),
        github_spec("gemini", "Gemini CLI", "google-gemini/gemini-cli", &["v"]),
        github_spec("opencode", "OpenCode", "sst/opencode", &["v"]),
    ]
}

fn github_spec(key: &str, display_name: &str, repo: &str, prefixes: &[&str]) -> SourceSpec {
    SourceSpec {
        key: key.to_string(),
        display_name: display_name.to_string(),
        kind: SourceKind::GithubReleases {
            releases_url: format!("https://api.github.com/repos/{}/releases", repo),
            tag_prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
        },
    }
}

/// Immutable key -> source mapping, in registration order
pub struct Registry {
    sources: Vec<Box<dyn ChangelogSource>>,
}

impl Registry {
    /// Build adapters from specs. A later spec with an existing key replaces
    /// the earlier one in place.
    pub fn from_specs(specs: &[SourceSpec]) -> Result<Self, Error> {
        let mut sources: Vec<Box<dyn ChangelogSource>> = Vec::with_capacity(specs.len());

        for spec in specs {
            let source = build_source(spec)?;
            match sources.iter().position(|s| s.key() == spec.key) {
                Some(index) => sources[index] = source,
                None => sources.push(source),
            }
        }

        Ok(Self { sources })
    }

    /// Built-in sources followed by configured ones
    pub fn with_overrides(extra: &[SourceSpec]) -> Result<Self, Error> {
        let mut specs = builtin_specs();
        specs.extend_from_slice(extra);
        Self::from_specs(&specs)
    }

    /// Wrap already constructed sources
    pub fn from_sources(sources: Vec<Box<dyn ChangelogSource>>) -> Self {
        Self { sources }
    }

    /// Look up a source by key
    pub fn get(&self, key: &str) -> Result<&dyn ChangelogSource, Error> {
        self.sources
            .iter()
            .find(|s| s.key() == key)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::Lookup(LookupError::UnknownSource(key.to_string())))
    }

    pub fn sources(&self) -> &[Box<dyn ChangelogSource>] {
        &self.sources
    }

    pub fn keys(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn build_source(spec: &SourceSpec) -> Result<Box<dyn ChangelogSource>, Error> {
    Ok(match &spec.kind {
        SourceKind::Markdown {
            url,
            header_pattern,
            commits_url,
        } => Box::new(MarkdownSource::new(
            &spec.key,
            &spec.display_name,
            url,
            header_pattern,
            commits_url.clone(),
        )?),
        SourceKind::GithubReleases {
            releases_url,
            tag_prefixes,
        } => Box::new(GithubReleasesSource::new(
            &spec.key,
            &spec.display_name,
            releases_url,
            tag_prefixes.clone(),
        )),
    })
}
