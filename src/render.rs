//! Output formatting for changelog entries and the status view

use crate::aggregate::StatusRow;
use crate::changelog::ChangelogEntry;
use serde::Serialize;

/// Width of the rule under plain-text titles
const RULE_WIDTH: usize = 40;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Pick the format from the `--json` / `--md` flags
    pub fn from_flags(json: bool, markdown: bool) -> Self {
        if json {
            OutputFormat::Json
        } else if markdown {
            OutputFormat::Markdown
        } else {
            OutputFormat::Text
        }
    }
}

/// Render one entry in the requested format.
///
/// `display_name` titles plain-text output when the entry carries no
/// source of its own.
pub fn render_entry(
    entry: &ChangelogEntry,
    display_name: &str,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_plain(entry, display_name)),
        OutputFormat::Markdown => Ok(render_markdown(entry)),
        OutputFormat::Json => render_json(entry),
    }
}

/// Render several entries, each titled by its own source.
pub fn render_entries(
    entries: &[ChangelogEntry],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => render_json(&entries),
        OutputFormat::Text => Ok(entries
            .iter()
            .map(|e| render_plain(e, e.source.as_deref().unwrap_or("")))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Markdown => Ok(entries
            .iter()
            .map(render_markdown)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Plain text: title, rule, then sections and ungrouped bullets
pub fn render_plain(entry: &ChangelogEntry, display_name: &str) -> String {
    let name = entry.source.as_deref().unwrap_or(display_name);
    let mut out = String::new();

    let title = format!("{} {}", name, entry.version);
    out.push_str(title.trim_start());
    if let Some(date) = date_suffix(entry) {
        out.push_str(&date);
    }
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for (i, section) in entry.sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("[{}]\n", section.name));
        for change in &section.changes {
            out.push_str(&format!("  * {}\n", change));
        }
    }

    if !entry.sections.is_empty() && !entry.changes.is_empty() {
        out.push('\n');
    }
    for change in &entry.changes {
        out.push_str(&format!("  * {}\n", change));
    }

    out
}

/// Markdown: `## version`, `### section` blocks, then ungrouped bullets.
///
/// Entries stamped with a source name carry it in the heading.
pub fn render_markdown(entry: &ChangelogEntry) -> String {
    let mut out = String::from("## ");
    if let Some(source) = &entry.source {
        out.push_str(source);
        out.push(' ');
    }
    out.push_str(&entry.version);
    if let Some(date) = date_suffix(entry) {
        out.push_str(&date);
    }
    out.push_str("\n\n");

    for (i, section) in entry.sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("### {}\n\n", section.name));
        for change in &section.changes {
            out.push_str(&format!("- {}\n", change));
        }
    }

    if !entry.sections.is_empty() && !entry.changes.is_empty() {
        out.push('\n');
    }
    for change in &entry.changes {
        out.push_str(&format!("- {}\n", change));
    }

    out
}

/// Pretty-printed JSON with a trailing newline
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// One version per line, or a JSON array of version strings
pub fn render_versions(
    entries: &[ChangelogEntry],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    let versions: Vec<&str> = entries.iter().map(|e| e.version.as_str()).collect();
    match format {
        OutputFormat::Json => render_json(&versions),
        _ => Ok(versions.iter().map(|v| format!("{}\n", v)).collect()),
    }
}

/// Aligned status table; `*` marks tools updated within the recent window
pub fn render_status_table(rows: &[StatusRow]) -> String {
    const HEADERS: [&str; 5] = ["TOOL", "LATEST", "PREVIOUS", "UPDATED", "CADENCE"];

    let cells: Vec<[&str; 5]> = rows
        .iter()
        .map(|r| {
            [
                r.source.as_str(),
                r.latest_version.as_str(),
                r.previous_version.as_str(),
                r.updated.as_str(),
                r.cadence.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |marker: &str, columns: &[&str; 5]| {
        let padded: Vec<String> = columns
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        format!("{} {}", marker, padded.join("  ")).trim_end().to_string() + "\n"
    };

    let mut out = format_line(" ", &HEADERS);
    for (row, columns) in rows.iter().zip(cells.iter()) {
        out.push_str(&format_line(if row.recent { "*" } else { " " }, columns));
    }
    out
}

fn date_suffix(entry: &ChangelogEntry) -> Option<String> {
    entry
        .released_at
        .map(|t| format!(" ({})", t.format("%Y-%m-%d")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::Section;
    use chrono::{TimeZone, Utc};

    fn section(name: &str, changes: &[&str]) -> Section {
        Section {
            name: name.to_string(),
            changes: changes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Text);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
    }

    #[test]
    fn test_plain_flat() {
        let mut entry = ChangelogEntry::new("2.0.70");
        entry.changes = vec!["Fix A".to_string(), "Fix B".to_string()];

        let expected = format!("Claude Code 2.0.70\n{}\n  * Fix A\n  * Fix B\n", "-".repeat(40));
        assert_eq!(render_plain(&entry, "Claude Code"), expected);
    }

    #[test]
    fn test_plain_dated_title() {
        let mut entry = ChangelogEntry::new("0.46.0");
        entry.released_at = Some(Utc.with_ymd_and_hms(2025, 10, 20, 17, 31, 2).unwrap());

        let out = render_plain(&entry, "Codex CLI");
        assert!(out.starts_with("Codex CLI 0.46.0 (2025-10-20)\n"));
    }

    #[test]
    fn test_plain_sections_only() {
        let mut entry = ChangelogEntry::new("1.0.0");
        entry.sections = vec![section("TUI", &["a"]), section("Core", &["b"])];

        let expected = format!("T 1.0.0\n{}\n[TUI]\n  * a\n\n[Core]\n  * b\n", "-".repeat(40));
        assert_eq!(render_plain(&entry, "T"), expected);
    }

    #[test]
    fn test_plain_blank_line_only_between_sections_and_ungrouped() {
        let mut entry = ChangelogEntry::new("1.0.0");
        entry.sections = vec![section("TUI", &["a"])];
        entry.changes = vec!["loose".to_string()];

        let expected = format!("T 1.0.0\n{}\n[TUI]\n  * a\n\n  * loose\n", "-".repeat(40));
        assert_eq!(render_plain(&entry, "T"), expected);

        entry.sections.clear();
        let expected = format!("T 1.0.0\n{}\n  * loose\n", "-".repeat(40));
        assert_eq!(render_plain(&entry, "T"), expected);
    }

    #[test]
    fn test_plain_prefers_entry_source() {
        let mut entry = ChangelogEntry::new("1.0.0");
        entry.source = Some("Gemini CLI".to_string());
        assert!(render_plain(&entry, "ignored").starts_with("Gemini CLI 1.0.0\n"));
    }

    #[test]
    fn test_markdown_flat() {
        let mut entry = ChangelogEntry::new("1.2.0");
        entry.changes = vec!["Fixed bug".to_string()];
        assert_eq!(render_markdown(&entry), "## 1.2.0\n\n- Fixed bug\n");
    }

    #[test]
    fn test_markdown_sections_and_ungrouped() {
        let mut entry = ChangelogEntry::new("0.46.0");
        entry.released_at = Some(Utc.with_ymd_and_hms(2025, 10, 20, 0, 0, 0).unwrap());
        entry.sections = vec![section("TUI", &["a"]), section("Core", &["b", "c"])];
        entry.changes = vec!["loose".to_string()];

        let expected = "## 0.46.0 (2025-10-20)\n\n### TUI\n\n- a\n\n### Core\n\n- b\n- c\n\n- loose\n";
        assert_eq!(render_markdown(&entry), expected);
    }

    #[test]
    fn test_json_omits_unset_fields() {
        let mut entry = ChangelogEntry::new("1.0.0");
        entry.changes = vec!["x".to_string()];

        let json = render_json(&entry).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["changes"][0], "x");
        assert!(value.get("released_at").is_none());
        assert!(value.get("source").is_none());
        assert!(value.get("sections").is_none());
    }

    #[test]
    fn test_json_full_entry() {
        let mut entry = ChangelogEntry::new("1.0.0");
        entry.released_at = Some(Utc.with_ymd_and_hms(2025, 10, 20, 17, 31, 2).unwrap());
        entry.source = Some("Codex CLI".to_string());
        entry.sections = vec![section("TUI", &["a"])];

        let value: serde_json::Value = serde_json::from_str(&render_json(&entry).unwrap()).unwrap();
        assert_eq!(value["released_at"], "2025-10-20T17:31:02Z");
        assert_eq!(value["source"], "Codex CLI");
        assert_eq!(value["sections"][0]["name"], "TUI");
        assert_eq!(value["sections"][0]["changes"][0], "a");
        assert!(value.get("changes").is_none());
    }

    #[test]
    fn test_versions() {
        let entries = vec![ChangelogEntry::new("1.2.0"), ChangelogEntry::new("1.1.0")];
        assert_eq!(render_versions(&entries, OutputFormat::Text).unwrap(), "1.2.0\n1.1.0\n");
        assert_eq!(
            render_versions(&entries, OutputFormat::Json).unwrap(),
            "[\n  \"1.2.0\",\n  \"1.1.0\"\n]\n"
        );
    }

    #[test]
    fn test_status_table() {
        let rows = vec![
            StatusRow {
                source: "Codex CLI".to_string(),
                latest_version: "0.46.0".to_string(),
                previous_version: "0.45.0".to_string(),
                released_at: None,
                updated: "3h ago".to_string(),
                recent: true,
                cadence: "~1d".to_string(),
            },
            StatusRow {
                source: "Claude Code".to_string(),
                latest_version: "2.0.70".to_string(),
                previous_version: "-".to_string(),
                released_at: None,
                updated: "-".to_string(),
                recent: false,
                cadence: "-".to_string(),
            },
        ];

        let table = render_status_table(&rows);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "  TOOL         LATEST  PREVIOUS  UPDATED  CADENCE");
        assert_eq!(lines[1], "* Codex CLI    0.46.0  0.45.0    3h ago   ~1d");
        assert_eq!(lines[2], "  Claude Code  2.0.70  -         -        -");
    }
}
