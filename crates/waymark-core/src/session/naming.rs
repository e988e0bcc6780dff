//! Display-name resolution for newly saved routes.

use std::collections::HashSet;

/// Name used when the draft is blank.
pub const DEFAULT_ROUTE_NAME: &str = "Route";

/// Resolves a draft name against the names already in use.
///
/// The draft is trimmed and defaults to [`DEFAULT_ROUTE_NAME`]. On a
/// case-insensitive collision, `" (2)"`, `" (3)"`, … is appended to the base
/// until the full candidate is free.
pub fn unique_route_name<'a, I>(draft: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let base = match draft.trim() {
        "" => DEFAULT_ROUTE_NAME,
        trimmed => trimmed,
    };

    let taken: HashSet<String> = existing
        .into_iter()
        .map(|name| name.trim().to_lowercase())
        .collect();

    if !taken.contains(&base.to_lowercase()) {
        return base.to_string();
    }

    (2u32..)
        .map(|n| format!("{base} ({n})"))
        .find(|candidate| !taken.contains(&candidate.to_lowercase()))
        .unwrap_or_else(|| base.to_string())
}
