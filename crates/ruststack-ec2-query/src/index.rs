//! Indexed parameter families (`Prefix.N`, `Prefix.N.Field`).
//!
//! Indices are 1-based positive integers written without leading zeros. Keys
//! whose index fragment is malformed are skipped rather than rejected.

use std::collections::BTreeMap;

use crate::params::QueryParams;

/// How an indexed list such as `SubnetId.N` is collected.
///
/// EC2 call sites disagree on this, so every caller names the policy it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Gather every present index and sort ascending; gaps are allowed.
    SparseIndexed,
    /// Read `N = 1, 2, ...` and stop at the first missing index.
    StrictSequential,
}

/// Parse a 1-based index fragment.
#[must_use]
pub fn parse_index(fragment: &str) -> Option<usize> {
    if fragment.is_empty()
        || fragment.starts_with('0')
        || !fragment.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    fragment.parse().ok()
}

/// Split `rest` into a leading index and the remainder after the next dot.
///
/// `"3.Name"` yields `(3, Some("Name"))`, `"3"` yields `(3, None)`.
pub(crate) fn split_index(rest: &str) -> Option<(usize, Option<&str>)> {
    match rest.split_once('.') {
        Some((index, tail)) => Some((parse_index(index)?, Some(tail))),
        None => Some((parse_index(rest)?, None)),
    }
}

/// Group the keys under `prefix.N.` by `N`.
///
/// Each group holds `(field, value)` pairs where `field` is the key remainder
/// after `prefix.N.`, e.g. `Values.2` for `Filter.1.Values.2`.
pub(crate) fn group_by_index<'a>(
    params: &'a QueryParams,
    prefix: &str,
) -> BTreeMap<usize, Vec<(&'a str, &'a str)>> {
    let mut groups: BTreeMap<usize, Vec<(&'a str, &'a str)>> = BTreeMap::new();
    for (key, value) in params.iter() {
        let Some(rest) = strip_family(key, prefix) else {
            continue;
        };
        match split_index(rest) {
            Some((index, Some(field))) => groups.entry(index).or_default().push((field, value)),
            _ => tracing::trace!(key, "skipping malformed indexed parameter"),
        }
    }
    groups
}

/// Strip `prefix.` from `key`.
pub(crate) fn strip_family<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?.strip_prefix('.')
}

impl QueryParams {
    /// Collect the values of `prefix.N` keys ordered by `N`.
    #[must_use]
    pub fn get_indexed_list(&self, prefix: &str, policy: IndexPolicy) -> Vec<String> {
        match policy {
            IndexPolicy::SparseIndexed => {
                let entries: BTreeMap<usize, &str> = self
                    .iter()
                    .filter_map(|(key, value)| {
                        let index = parse_index(strip_family(key, prefix)?)?;
                        Some((index, value))
                    })
                    .collect();
                entries.into_values().map(ToOwned::to_owned).collect()
            }
            IndexPolicy::StrictSequential => (1..)
                .map_while(|n| self.get_scalar(&format!("{prefix}.{n}")))
                .map(ToOwned::to_owned)
                .collect(),
        }
    }
}
