//! `Describe*` filter evaluation.
//!
//! Filters combine with AND; the values of one filter combine with OR. A filter
//! with no values places no constraint on the result.
//!
//! Attribute lookup goes through an [`AccessorTable`] registered per resource
//! type, so no reflection over resource shapes is needed. Tag filters
//! (`tag:<key>`, `tag-key`, `tag-value`) read the resource's tag collection
//! through the table's tag accessor instead.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use ruststack_core::RustStackError;
use ruststack_ec2_model::error::Ec2Error;
use ruststack_ec2_model::types::{ParsedFilter, Tag};

/// Prefix of the `tag:<key>` filter family.
pub const TAG_FILTER_PREFIX: &str = "tag:";

/// Filter matching any tag key.
pub const TAG_KEY_FILTER: &str = "tag-key";

/// Filter matching any tag value.
pub const TAG_VALUE_FILTER: &str = "tag-value";

/// An attribute value as seen by the filter engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// A plain string attribute.
    Str(String),
    /// A boolean attribute, compared against lowercase `true`/`false`.
    Bool(bool),
    /// A multi-valued attribute; matches when any element matches.
    List(Vec<String>),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// What happens to a filter whose name the accessor table does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFilterPolicy {
    /// Ignore the filter; every resource passes it.
    #[default]
    MatchAll,
    /// No resource passes the filter.
    MatchNone,
    /// Fail the request with `InvalidFilter`.
    Reject,
}

impl UnknownFilterPolicy {
    /// Returns the configuration spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatchAll => "match-all",
            Self::MatchNone => "match-none",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for UnknownFilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownFilterPolicy {
    type Err = RustStackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "match-all" => Ok(Self::MatchAll),
            "match-none" => Ok(Self::MatchNone),
            "reject" => Ok(Self::Reject),
            other => Err(RustStackError::Config(format!(
                "unknown filter policy {other}, expected match-all, match-none or reject"
            ))),
        }
    }
}

type Accessor<R> = Box<dyn Fn(&R) -> Option<FilterValue> + Send + Sync>;
type TagAccessor<R> = Box<dyn Fn(&R) -> &[Tag] + Send + Sync>;

/// Filter name to attribute lookup for one resource type.
pub struct AccessorTable<R> {
    attributes: HashMap<String, Accessor<R>>,
    tags: Option<TagAccessor<R>>,
}

impl<R> fmt::Debug for AccessorTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AccessorTable")
            .field("attributes", &names)
            .field("tags", &self.tags.is_some())
            .finish()
    }
}

impl<R> Default for AccessorTable<R> {
    fn default() -> Self {
        Self {
            attributes: HashMap::new(),
            tags: None,
        }
    }
}

impl<R> AccessorTable<R> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the accessor for filter `name`. `None` from the accessor
    /// means the attribute is absent and matches nothing.
    #[must_use]
    pub fn attribute<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Option<FilterValue> + Send + Sync + 'static,
    {
        self.attributes.insert(name.into(), Box::new(accessor));
        self
    }

    /// Register the tag accessor used by the tag filters.
    #[must_use]
    pub fn with_tags<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&R) -> &[Tag] + Send + Sync + 'static,
    {
        self.tags = Some(Box::new(accessor));
        self
    }

    /// Whether `name` is a filter this table can evaluate.
    ///
    /// Tag filters are always known; a table without a tag accessor treats
    /// every resource as untagged.
    #[must_use]
    pub fn supports(&self, name: &str) -> bool {
        is_tag_filter(name) || self.attributes.contains_key(name)
    }

    /// Look up attribute `name` on `resource`.
    #[must_use]
    pub fn get(&self, resource: &R, name: &str) -> Option<FilterValue> {
        self.attributes.get(name).and_then(|accessor| accessor(resource))
    }

    fn tags<'r>(&self, resource: &'r R) -> &'r [Tag] {
        match &self.tags {
            Some(accessor) => accessor(resource),
            None => &[],
        }
    }
}

fn is_tag_filter(name: &str) -> bool {
    name.starts_with(TAG_FILTER_PREFIX) || name == TAG_KEY_FILTER || name == TAG_VALUE_FILTER
}

/// Match one filter value against one attribute string.
///
/// `*` matches anything and a trailing `*` is a prefix match.
fn pattern_matches(pattern: &str, actual: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => actual.starts_with(prefix),
        None => actual == pattern,
    }
}

fn value_matches(pattern: &str, value: &FilterValue) -> bool {
    match value {
        FilterValue::Str(s) => pattern_matches(pattern, s),
        FilterValue::Bool(b) => {
            let actual = if *b { "true" } else { "false" };
            pattern_matches(&pattern.to_ascii_lowercase(), actual)
        }
        FilterValue::List(items) => items.iter().any(|item| pattern_matches(pattern, item)),
    }
}

/// A tag without a value has a null value: value patterns, `*` included,
/// never match it. Its key is still seen by `tag-key`.
fn tag_filter_matches(name: &str, patterns: &[String], tags: &[Tag]) -> bool {
    let any_pattern = |actual: &str| patterns.iter().any(|p| pattern_matches(p, actual));
    let tag_value_matches =
        |tag: &Tag| tag.value.as_deref().is_some_and(|value| any_pattern(value));

    if let Some(key) = name.strip_prefix(TAG_FILTER_PREFIX) {
        tags.iter()
            .filter(|tag| tag.key == key)
            .any(tag_value_matches)
    } else if name == TAG_KEY_FILTER {
        tags.iter().any(|tag| any_pattern(&tag.key))
    } else {
        tags.iter().any(tag_value_matches)
    }
}

/// Whether `resource` passes `filter`.
///
/// Under [`UnknownFilterPolicy::Reject`] an unknown name evaluates to `false`;
/// [`apply_filters`] reports it as an error before evaluation starts.
pub fn matches_filter<R>(
    resource: &R,
    filter: &ParsedFilter,
    table: &AccessorTable<R>,
    policy: UnknownFilterPolicy,
) -> bool {
    if filter.values.is_empty() {
        return true;
    }

    if is_tag_filter(&filter.name) {
        return tag_filter_matches(&filter.name, &filter.values, table.tags(resource));
    }

    if !table.supports(&filter.name) {
        return policy == UnknownFilterPolicy::MatchAll;
    }

    match table.get(resource, &filter.name) {
        Some(value) => filter.values.iter().any(|p| value_matches(p, &value)),
        None => false,
    }
}

/// Return the resources that pass every filter, in their original order.
///
/// # Errors
///
/// Returns `InvalidFilter` when `policy` is [`UnknownFilterPolicy::Reject`]
/// and a filter name is not in `table`.
pub fn apply_filters<'a, R, I>(
    resources: I,
    filters: &[ParsedFilter],
    table: &AccessorTable<R>,
    policy: UnknownFilterPolicy,
) -> Result<Vec<&'a R>, Ec2Error>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
{
    if policy == UnknownFilterPolicy::Reject {
        if let Some(unknown) = filters.iter().find(|f| !table.supports(&f.name)) {
            tracing::warn!(filter = %unknown.name, "rejecting unknown filter");
            return Err(Ec2Error::invalid_filter(&unknown.name));
        }
    }

    let mut total = 0_usize;
    let matched: Vec<&R> = resources
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|resource| {
            filters
                .iter()
                .all(|filter| matches_filter(*resource, filter, table, policy))
        })
        .collect();

    tracing::debug!(
        total,
        matched = matched.len(),
        filters = filters.len(),
        "applied filters"
    );
    Ok(matched)
}
