//! Structured request and result types shared by EC2 backends.

use crate::node::{ResponseNode, ToResponseNode};

/// A resource tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value; EC2 allows a key without a value.
    pub value: Option<String>,
}

impl Tag {
    /// Create a tag with a value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Create a tag with no value.
    #[must_use]
    pub fn key_only(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

impl ToResponseNode for Tag {
    fn to_response_node(&self) -> ResponseNode {
        ResponseNode::object([
            ("key", ResponseNode::from(self.key.as_str())),
            // An absent value renders as an empty element, matching EC2's tagSet output.
            ("value", ResponseNode::from(self.value.as_deref().unwrap_or(""))),
        ])
    }
}

/// One `{Name, Values}` filter decoded from `Filter.N.*` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ParsedFilter {
    /// Filter name, e.g. `vpc-id` or `tag:Name`.
    pub name: String,
    /// Accepted values, ordered by their `.M` index. Empty means no constraint.
    pub values: Vec<String>,
}

impl ParsedFilter {
    /// Create a filter.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Tags requested for a resource type at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct TagSpecification {
    /// The resource type the tags apply to, e.g. `subnet`.
    pub resource_type: Option<String>,
    /// Tags ordered by their `.M` index.
    pub tags: Vec<Tag>,
}

impl TagSpecification {
    /// Whether this specification applies to the given resource type.
    ///
    /// A specification without a resource type applies to every type.
    #[must_use]
    pub fn applies_to(&self, resource_type: &str) -> bool {
        self.resource_type
            .as_deref()
            .is_none_or(|t| t == resource_type)
    }
}

/// Collect the tags of every specification that applies to `resource_type`.
#[must_use]
pub fn tags_for_resource_type(specs: &[TagSpecification], resource_type: &str) -> Vec<Tag> {
    specs
        .iter()
        .filter(|spec| spec.applies_to(resource_type))
        .flat_map(|spec| spec.tags.iter().cloned())
        .collect()
}

/// Pagination parameters of a `Describe*` request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Requested page size, already range-checked by the caller.
    pub max_results: Option<usize>,
    /// Continuation token from the previous page.
    pub next_token: Option<String>,
}

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    /// Items of this page, in collection order.
    pub items: Vec<T>,
    /// Token for the next page; `None` when no items remain.
    pub next_token: Option<String>,
}

impl<T> PageResult<T> {
    /// Transform every item while keeping the token.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            next_token: self.next_token,
        }
    }

    /// Whether further pages exist.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}
