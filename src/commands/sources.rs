use crate::sources::Registry;

/// List registered source keys with their display names
pub fn sources_command(registry: &Registry) -> String {
    let width = registry.keys().iter().map(|k| k.len()).max().unwrap_or(0);

    registry
        .sources()
        .iter()
        .map(|s| format!("{:<width$}  {}\n", s.key(), s.display_name(), width = width))
        .collect()
}
