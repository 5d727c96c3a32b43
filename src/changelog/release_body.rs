//! Release-body section parsing
//!
//! GitHub release bodies group bullets under markdown headers. The scan is
//! a single pass over lines with two states: no section open, or one
//! section accumulating changes.

use super::Section;

/// Wrapper header GitHub puts around generated notes
const WRAPPER_HEADER: &str = "What's Changed";

enum ScanState {
    NoSection,
    InSection(Section),
}

/// Split a release body into named sections and ungrouped changes.
///
/// Sections without changes are dropped. The `What's Changed` wrapper
/// closes the open section without starting a new one, so its bullets
/// land in the ungrouped list. Bullets starting with `@` are bot
/// attributions and are skipped.
pub fn parse_release_body(body: &str) -> (Vec<Section>, Vec<String>) {
    let mut sections = Vec::new();
    let mut ungrouped = Vec::new();
    let mut state = ScanState::NoSection;

    for line in body.lines() {
        let trimmed = line.trim();

        if let Some(name) = header_text(trimmed) {
            flush(std::mem::replace(&mut state, ScanState::NoSection), &mut sections);
            if name != WRAPPER_HEADER {
                state = ScanState::InSection(Section {
                    name: name.to_string(),
                    changes: Vec::new(),
                });
            }
            continue;
        }

        let Some(item) = bullet_text(trimmed) else {
            continue;
        };
        if item.is_empty() || item.starts_with('@') {
            continue;
        }

        match &mut state {
            ScanState::InSection(section) => section.changes.push(item.to_string()),
            ScanState::NoSection => ungrouped.push(item.to_string()),
        }
    }

    flush(state, &mut sections);
    (sections, ungrouped)
}

fn flush(state: ScanState, sections: &mut Vec<Section>) {
    if let ScanState::InSection(section) = state {
        if !section.changes.is_empty() {
            sections.push(section);
        }
    }
}

/// Text of a level 1-3 markdown header, if the line is one.
fn header_text(line: &str) -> Option<&str> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name = rest.trim();
    (!name.is_empty()).then_some(name)
}

/// Text of a `- ` or `* ` list item, marker stripped and trimmed.
fn bullet_text(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}
