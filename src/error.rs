//! Error types for cc-latest
//!
//! Every failure mode of the changelog pipeline:
//! - Fetching (transport failures, non-success HTTP status, undecodable JSON)
//! - Lookups (unknown source keys, missing versions, empty changelogs)
//! - Aggregation across all sources (nothing registered, every source failed)
//! - Configuration (unreadable file, invalid TOML, bad header patterns)

use std::fmt;
use std::io;

/// Result type alias for cc-latest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cc-latest
#[derive(Debug)]
pub enum Error {
    /// HTTP fetch errors
    Fetch(FetchError),
    /// Source or version lookup errors
    Lookup(LookupError),
    /// Multi-source aggregation errors
    Aggregate(AggregateError),
    /// Configuration errors
    Config(ConfigError),
}

/// HTTP fetch errors
#[derive(Debug)]
pub enum FetchError {
    /// The HTTP client itself could not be constructed
    ClientBuild { details: String },
    /// Connection refused, DNS failure, timeout, truncated body
    Transport { url: String, source: String },
    /// Server answered with a non-success status
    HttpStatus { url: String, status: u16 },
    /// Response body is not the JSON shape we expected
    Decode { url: String, details: String },
}

/// Lookup errors, always fatal to the invocation
#[derive(Debug)]
pub enum LookupError {
    /// No source registered under this key
    UnknownSource(String),
    /// Requested version absent from the parsed entries
    VersionNotFound { source: String, version: String },
    /// Parser produced zero entries for this source
    EmptyResult(String),
}

/// Aggregation errors
#[derive(Debug)]
pub enum AggregateError {
    /// Registry is empty
    NoSources,
    /// Every registered source failed to produce entries
    AllSourcesFailed { sources: Vec<String> },
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    ReadFailed { path: String, source: io::Error },
    /// Config file is not valid TOML for our schema
    ParseFailed { path: String, details: String },
    /// A source's version-header pattern does not compile
    InvalidPattern { source_key: String, details: String },
    /// A setting is outside its accepted range
    InvalidValue { key: String, details: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fetch(e) => write!(f, "Fetch error: {}", e),
            Error::Lookup(e) => write!(f, "{}", e),
            Error::Aggregate(e) => write!(f, "Aggregate error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::ClientBuild { details } => {
                write!(f, "Failed to build HTTP client: {}", details)
            }
            FetchError::Transport { url, source } => {
                write!(f, "Request to {} failed: {}", url, source)
            }
            FetchError::HttpStatus { url, status } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            FetchError::Decode { url, details } => {
                write!(f, "Malformed response from {}: {}", url, details)
            }
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::UnknownSource(key) => {
                write!(f, "Unknown source '{}'", key)
            }
            LookupError::VersionNotFound { source, version } => {
                write!(f, "Version {} not found for {}", version, source)
            }
            LookupError::EmptyResult(source) => {
                write!(f, "No changelog entries found for {}", source)
            }
        }
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::NoSources => write!(f, "No sources registered"),
            AggregateError::AllSourcesFailed { sources } => {
                write!(
                    f,
                    "All {} sources failed: {}",
                    sources.len(),
                    sources.join(", ")
                )
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
            ConfigError::ParseFailed { path, details } => {
                write!(f, "Failed to parse {}: {}", path, details)
            }
            ConfigError::InvalidPattern {
                source_key,
                details,
            } => {
                write!(
                    f,
                    "Invalid header pattern for source '{}': {}",
                    source_key, details
                )
            }
            ConfigError::InvalidValue { key, details } => {
                write!(f, "Invalid value for {}: {}", key, details)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(ConfigError::ReadFailed { source, .. }) => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for FetchError {}
impl std::error::Error for LookupError {}
impl std::error::Error for AggregateError {}
impl std::error::Error for ConfigError {}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<LookupError> for Error {
    fn from(err: LookupError) -> Self {
        Error::Lookup(err)
    }
}

impl Error {
    /// Check if the error came from talking to a remote source
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::Fetch(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Fetch(FetchError::HttpStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Get formatted context string for logging
    pub fn context(&self) -> String {
        match self {
            Error::Fetch(e) => format!("fetch: {}", e),
            Error::Lookup(e) => format!("lookup: {}", e),
            Error::Aggregate(e) => format!("aggregate: {}", e),
            Error::Config(e) => format!("config: {}", e),
        }
    }
}
