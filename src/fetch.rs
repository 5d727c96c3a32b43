//! HTTP fetching for changelog sources
//!
//! Thin wrapper over a shared `reqwest::Client` that maps transport
//! failures, non-success statuses and undecodable JSON onto [`FetchError`].
//! Requests are never retried.

use crate::config::HttpConfig;
use crate::error::{Error, FetchError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client used by every source adapter
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher with the configured user agent and per-request timeout
    pub fn new(config: &HttpConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                Error::Fetch(FetchError::ClientBuild {
                    details: e.to_string(),
                })
            })?;

        Ok(Self { client })
    }

    /// GET a URL and return the body as text
    pub async fn get_text(&self, url: &str) -> Result<String, Error> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        let body = response.text().await.map_err(|e| transport(url, e))?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(body)
    }

    /// GET a URL and decode the body as JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| {
            Error::Fetch(FetchError::Decode {
                url: url.to_string(),
                details: e.to_string(),
            })
        })
    }
}

fn transport(url: &str, err: reqwest::Error) -> Error {
    Error::Fetch(FetchError::Transport {
        url: url.to_string(),
        source: err.to_string(),
    })
}
