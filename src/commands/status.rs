//! `status`: one summary row per source

use super::spinner;
use crate::aggregate;
use crate::config::AggregateConfig;
use crate::fetch::Fetcher;
use crate::render::{render_json, render_status_table};
use crate::sources::Registry;
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

pub async fn status_command(
    registry: &Registry,
    fetcher: &Fetcher,
    config: &AggregateConfig,
    json: bool,
    now: DateTime<Utc>,
) -> Result<String> {
    let pb = spinner(&format!("Checking {} sources...", registry.len()));
    let result = aggregate::status(registry, fetcher, config, now).await;
    pb.finish_and_clear();
    let status = result?;

    if !status.failures.is_empty() {
        info!(
            "status: {} of {} sources skipped",
            status.failures.len(),
            registry.len()
        );
    }

    if json {
        Ok(render_json(&status.items)?)
    } else {
        Ok(render_status_table(&status.items))
    }
}
