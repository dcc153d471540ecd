//! Offset-based `NextToken` pagination.
//!
//! A token is the decimal offset of the first item of the next page. Tokens
//! are not signed and carry no snapshot: if the collection changes between two
//! calls, the second page may skip or repeat items.

use ruststack_ec2_model::types::{PageRequest, PageResult};

/// Page size used when the caller supplies no `MaxResults`.
pub const DEFAULT_MAX_RESULTS: usize = 1000;

/// Encode an offset as a `NextToken`.
#[must_use]
pub fn encode_token(offset: usize) -> String {
    offset.to_string()
}

/// Decode a `NextToken` into an offset.
///
/// Absent or unparsable tokens start from the beginning.
#[must_use]
pub fn decode_token(token: Option<&str>) -> usize {
    let Some(token) = token else {
        return 0;
    };
    token.parse().unwrap_or_else(|_| {
        tracing::debug!(token, "unparsable NextToken, starting from the first item");
        0
    })
}

/// Cut one page out of `items`.
///
/// `max_results` is used as given apart from a limit of 0, which is raised
/// to 1 so a token always advances. Range checks belong to the caller (see
/// `MaxResultsBounds` in the query crate). `next_token` is set exactly when
/// items remain after the page.
#[must_use]
pub fn paginate<T>(
    items: Vec<T>,
    max_results: Option<usize>,
    token: Option<&str>,
    default_max: usize,
) -> PageResult<T> {
    let total = items.len();
    let start = decode_token(token).min(total);
    let limit = max_results.unwrap_or(default_max).max(1);
    let end = start.saturating_add(limit).min(total);

    let next_token = (end < total).then(|| encode_token(end));
    let items: Vec<T> = items.into_iter().skip(start).take(end - start).collect();

    tracing::debug!(total, start, end, has_more = next_token.is_some(), "paginated");
    PageResult { items, next_token }
}

/// [`paginate`] driven by a decoded [`PageRequest`].
#[must_use]
pub fn paginate_request<T>(items: Vec<T>, request: &PageRequest, default_max: usize) -> PageResult<T> {
    paginate(
        items,
        request.max_results,
        request.next_token.as_deref(),
        default_max,
    )
}
