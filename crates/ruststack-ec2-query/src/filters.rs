//! `Filter.N.Name` / `Filter.N.Values.M` decoding.

use std::collections::BTreeMap;

use ruststack_ec2_model::types::ParsedFilter;

use crate::index::{group_by_index, split_index};
use crate::params::QueryParams;

/// Default prefix of the filter family.
pub const FILTER_PREFIX: &str = "Filter";

impl QueryParams {
    /// Decode the filters under `Filter`.
    #[must_use]
    pub fn parse_filters(&self) -> Vec<ParsedFilter> {
        self.parse_filters_with_prefix(FILTER_PREFIX)
    }

    /// Decode the filters under `prefix`.
    ///
    /// One filter is produced per index `N` that carries a `Name`, in ascending
    /// `N` order. Values are ordered by `M`. `Values.M` and the singular
    /// `Value.M` spelling are both accepted; when both name the same `M`, the
    /// plural spelling wins.
    #[must_use]
    pub fn parse_filters_with_prefix(&self, prefix: &str) -> Vec<ParsedFilter> {
        let mut filters = Vec::new();

        for (index, fields) in group_by_index(self, prefix) {
            let mut name = None;
            let mut plural = BTreeMap::new();
            let mut singular = BTreeMap::new();

            for (field, value) in fields {
                if field == "Name" {
                    name = Some(value);
                } else if let Some(rest) = field.strip_prefix("Values.") {
                    if let Some((m, None)) = split_index(rest) {
                        plural.insert(m, value);
                    }
                } else if let Some(rest) = field.strip_prefix("Value.") {
                    if let Some((m, None)) = split_index(rest) {
                        singular.insert(m, value);
                    }
                }
            }

            let Some(name) = name else {
                tracing::debug!(prefix, index, "skipping filter without a name");
                continue;
            };

            singular.extend(plural);
            filters.push(ParsedFilter::new(name, singular.into_values()));
        }

        tracing::debug!(prefix, count = filters.len(), "parsed filters");
        filters
    }
}

/// Flatten filters back into `Filter.N.Name` / `Filter.N.Values.M` parameters.
///
/// Filters are numbered from 1 in the order given.
#[must_use]
pub fn flatten_filters(filters: &[ParsedFilter]) -> QueryParams {
    let mut params = QueryParams::new();
    for (i, filter) in filters.iter().enumerate() {
        let n = i + 1;
        params.insert(format!("{FILTER_PREFIX}.{n}.Name"), filter.name.as_str());
        for (j, value) in filter.values.iter().enumerate() {
            params.insert(format!("{FILTER_PREFIX}.{n}.Values.{}", j + 1), value.as_str());
        }
    }
    params
}
