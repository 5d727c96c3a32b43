//! Release tag normalization

/// Prefixes stripped when a source does not configure its own
pub const DEFAULT_TAG_PREFIXES: &[&str] = &["rust-v", "v"];

/// Strip at most one known prefix from a release tag.
///
/// Longer prefixes are tried first so `rust-v0.46.0` loses `rust-v` rather
/// than nothing. A tag consisting only of a prefix is returned unchanged.
pub fn normalize_tag<S: AsRef<str>>(tag: &str, prefixes: &[S]) -> String {
    let tag = tag.trim();
    let mut ordered: Vec<&str> = prefixes.iter().map(AsRef::as_ref).collect();
    ordered.sort_by_key(|p| std::cmp::Reverse(p.len()));

    ordered
        .into_iter()
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| tag.strip_prefix(prefix).filter(|rest| !rest.is_empty()))
        .unwrap_or(tag)
        .to_string()
}
