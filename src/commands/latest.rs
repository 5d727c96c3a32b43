//! `latest`: releases from every source within the recent window

use super::spinner;
use crate::aggregate;
use crate::config::AggregateConfig;
use crate::fetch::Fetcher;
use crate::render::{render_entries, render_json, OutputFormat};
use crate::sources::Registry;
use anyhow::Result;
use chrono::{DateTime, Utc};

pub async fn latest_command(
    registry: &Registry,
    fetcher: &Fetcher,
    config: &AggregateConfig,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> Result<String> {
    let pb = spinner(&format!("Checking {} sources...", registry.len()));
    let result = aggregate::latest(registry, fetcher, config, now).await;
    pb.finish_and_clear();
    let latest = result?;

    if latest.items.is_empty() {
        return Ok(match format {
            OutputFormat::Json => render_json(&latest.items)?,
            _ => format!(
                "No releases in the last {} hours\n",
                config.recent_window_hours
            ),
        });
    }

    Ok(render_entries(&latest.items, format)?)
}
