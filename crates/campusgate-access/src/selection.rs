//! Reconciling a chosen access list with a recomputed candidate pool.
//!
//! When an operator changes a user's department or role, the candidate pool
//! is recomputed with [`filter_options`](crate::privileges::filter_options).
//! What happens to the entries already selected is a separate decision,
//! expressed by [`SelectionPolicy`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

/// What to do with an existing selection after the pool is recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Discard the previous selection entirely. This is what the portal's
    /// edit form does on every department or role change.
    #[default]
    Clear,
    /// Keep the previously selected entries that are still in the new pool.
    RetainValid,
}

/// Applies `policy` to `selection` against the new `pool`.
///
/// With [`SelectionPolicy::RetainValid`] the result keeps the order of
/// `selection` and drops duplicates.
pub fn reconcile_selection(
    selection: &[String],
    pool: &[String],
    policy: SelectionPolicy,
) -> Vec<String> {
    match policy {
        SelectionPolicy::Clear => Vec::new(),
        SelectionPolicy::RetainValid => {
            let pool: HashSet<&str> = pool.iter().map(String::as_str).collect();
            dedup_access(
                selection
                    .iter()
                    .filter(|entry| pool.contains(entry.as_str()))
                    .cloned(),
            )
        }
    }
}

/// Removes duplicate entries from an access list, keeping the first
/// occurrence of each.
pub fn dedup_access<I>(access: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    access
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

/// Splits `access` into entries inside and outside `pool`, preserving order.
pub fn partition_by_pool(access: &[String], pool: &[String]) -> (Vec<String>, Vec<String>) {
    let pool: HashSet<&str> = pool.iter().map(String::as_str).collect();
    access
        .iter()
        .cloned()
        .partition(|entry| pool.contains(entry.as_str()))
}
