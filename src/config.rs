use crate::error::{ConfigError, Error};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub aggregate: AggregateConfig,
    /// Extra sources; a source reusing a built-in key replaces it
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

impl Config {
    /// Load a TOML config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| {
            Error::Config(ConfigError::ReadFailed {
                path: path.display().to_string(),
                source,
            })
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            Error::Config(ConfigError::ParseFailed {
                path: path.display().to_string(),
                details: e.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that parse but cannot be used
    pub fn validate(&self) -> Result<(), Error> {
        if self.http.timeout_secs == 0 {
            return Err(invalid("http.timeout_secs", "must be at least 1"));
        }
        self.aggregate.window()?;
        if self.aggregate.status_depth == 0 {
            return Err(invalid("aggregate.status_depth", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(key: &str, details: impl Into<String>) -> Error {
    Error::Config(ConfigError::InvalidValue {
        key: key.to_string(),
        details: details.into(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("cc-latest/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Trailing window for `latest` and the status "recent" marker
    #[serde(default = "default_recent_window_hours")]
    pub recent_window_hours: i64,
    /// Entries per source considered by `status`
    #[serde(default = "default_status_depth")]
    pub status_depth: usize,
}

/// Ten years
const MAX_RECENT_WINDOW_HOURS: i64 = 24 * 365 * 10;

fn default_recent_window_hours() -> i64 {
    24
}

fn default_status_depth() -> usize {
    10
}

impl AggregateConfig {
    /// The recent window as a duration
    pub fn window(&self) -> Result<Duration, Error> {
        let hours = self.recent_window_hours;
        if !(1..=MAX_RECENT_WINDOW_HOURS).contains(&hours) {
            return Err(invalid(
                "aggregate.recent_window_hours",
                format!("{} is outside 1..={}", hours, MAX_RECENT_WINDOW_HOURS),
            ));
        }
        Duration::try_hours(hours).ok_or_else(|| {
            invalid("aggregate.recent_window_hours", format!("{} hours overflows", hours))
        })
    }
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            recent_window_hours: default_recent_window_hours(),
            status_depth: default_status_depth(),
        }
    }
}

/// Declarative description of one changelog source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub key: String,
    pub display_name: String,
    #[serde(flatten)]
    pub kind: SourceKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceKind {
    /// Raw markdown CHANGELOG with one header per version
    Markdown {
        url: String,
        header_pattern: String,
        /// Commit-history endpoint used to date the newest entry
        #[serde(default)]
        commits_url: Option<String>,
    },
    /// GitHub Releases listing
    GithubReleases {
        releases_url: String,
        #[serde(default = "default_tag_prefixes")]
        tag_prefixes: Vec<String>,
    },
}

fn default_tag_prefixes() -> Vec<String> {
    crate::changelog::version::DEFAULT_TAG_PREFIXES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("cc-latest/"));
        assert_eq!(config.aggregate.recent_window_hours, 24);
        assert_eq!(config.aggregate.status_depth, 10);
        assert!(config.sources.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout_secs = 5\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert!(config.http.user_agent.starts_with("cc-latest/"));
        assert_eq!(config.aggregate.status_depth, 10);
    }

    #[test]
    fn test_sources_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[sources]]
key = "aider"
display_name = "Aider"
kind = "markdown"
url = "https://example.com/HISTORY.md"
header_pattern = '^### main branch (\d+\.\d+\.\d+)\s*$'

[[sources]]
key = "goose"
display_name = "Goose"
kind = "github-releases"
releases_url = "https://api.github.com/repos/block/goose/releases"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert!(matches!(
            &config.sources[0].kind,
            SourceKind::Markdown { commits_url: None, .. }
        ));
        match &config.sources[1].kind {
            SourceKind::GithubReleases { tag_prefixes, .. } => {
                assert_eq!(tag_prefixes, &vec!["rust-v".to_string(), "v".to_string()]);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    fn load_str(contents: &str) -> Result<Config, Error> {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        Config::load(file.path())
    }

    #[test]
    fn test_window_out_of_range_is_rejected() {
        for hours in ["0", "-24", "9223372036854775807", "87601"] {
            let err = load_str(&format!("[aggregate]\nrecent_window_hours = {}\n", hours))
                .unwrap_err();
            match err {
                Error::Config(ConfigError::InvalidValue { key, .. }) => {
                    assert_eq!(key, "aggregate.recent_window_hours");
                }
                other => panic!("unexpected error for {}: {}", hours, other),
            }
        }
    }

    #[test]
    fn test_window_upper_bound_is_accepted() {
        let config = load_str("[aggregate]\nrecent_window_hours = 87600\n").unwrap();
        assert_eq!(config.aggregate.window().unwrap(), Duration::hours(87_600));
    }

    #[test]
    fn test_zero_timeout_and_depth_are_rejected() {
        let err = load_str("[http]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { ref key, .. }) if key == "http.timeout_secs"
        ));

        let err = load_str("[aggregate]\nstatus_depth = 0\n").unwrap_err();
        match err {
            Error::Config(ConfigError::InvalidValue { key, .. }) => {
                assert_eq!(key, "aggregate.status_depth");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFailed { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[http\ntimeout_secs = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseFailed { .. })));
    }
}
