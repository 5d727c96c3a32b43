//! Single-source command: one entry, a specific version, or the version list

use crate::changelog::find_version;
use crate::error::{Error, LookupError};
use crate::fetch::Fetcher;
use crate::render::{render_entry, render_versions, OutputFormat};
use crate::sources::Registry;
use anyhow::Result;
use tracing::debug;

/// What to show for one source
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// Registry key of the source
    pub source: String,
    pub format: OutputFormat,
    /// Only list versions
    pub list: bool,
    /// Exact version to show instead of the newest
    pub version: Option<String>,
}

/// Fetch one source and render the selected entry (or version list).
pub async fn show_command(
    registry: &Registry,
    fetcher: &Fetcher,
    options: &ShowOptions,
) -> Result<String> {
    let source = registry.get(&options.source)?;

    let entries = match source.fetch(fetcher).await {
        Ok(entries) => entries,
        Err(e) if e.is_fetch() => {
            let context = format!("Failed to fetch {} changelog", source.display_name());
            return Err(anyhow::Error::new(e).context(context));
        }
        Err(e) => return Err(e.into()),
    };
    if entries.is_empty() {
        let name = source.display_name().to_string();
        return Err(Error::Lookup(LookupError::EmptyResult(name)).into());
    }
    debug!("{}: {} entries available", source.key(), entries.len());

    if options.list {
        return Ok(render_versions(&entries, options.format)?);
    }

    let entry = match &options.version {
        Some(version) => find_version(&entries, version).ok_or_else(|| {
            Error::Lookup(LookupError::VersionNotFound {
                source: source.display_name().to_string(),
                version: version.clone(),
            })
        })?,
        None => &entries[0],
    };

    Ok(render_entry(entry, source.display_name(), options.format)?)
}
