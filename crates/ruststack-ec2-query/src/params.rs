//! The flat parameter map of an EC2 Query API request.
//!
//! After transport decoding every request is a map of dotted, 1-based indexed
//! keys to string values:
//!
//! ```text
//! Action=DescribeSubnets
//! Filter.1.Name=tag:Name
//! Filter.1.Values.1=web
//! SubnetId.1=subnet-0a1b2c3d
//! ```

use std::collections::HashMap;

use ruststack_ec2_model::error::Ec2Error;

/// Decoded request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    inner: HashMap<String, String>,
}

impl QueryParams {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` body or query string.
    ///
    /// A repeated key keeps its last value.
    #[must_use]
    pub fn from_urlencoded(input: &[u8]) -> Self {
        form_urlencoded::parse(input).into_owned().collect()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(key, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `Action` parameter.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.get_scalar("Action")
    }

    /// The raw value of a parameter.
    #[must_use]
    pub fn get_scalar(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// A required parameter; `MissingParameter` when absent.
    pub fn require(&self, key: &str) -> Result<&str, Ec2Error> {
        self.get_scalar(key)
            .ok_or_else(|| Ec2Error::missing_parameter(key))
    }

    /// An integer parameter; `InvalidParameterValue` when present but not numeric.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, Ec2Error> {
        let Some(raw) = self.get_scalar(key) else {
            return Ok(None);
        };
        raw.parse::<i64>().map(Some).map_err(|_| {
            tracing::debug!(key, value = raw, "rejecting non-numeric parameter");
            Ec2Error::invalid_parameter_value(format!(
                "Invalid value '{raw}' for {key}. Expected an integer."
            ))
        })
    }

    /// A boolean parameter (`true`/`false`, case-insensitive).
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, Ec2Error> {
        let Some(raw) = self.get_scalar(key) else {
            return Ok(None);
        };
        if raw.eq_ignore_ascii_case("true") {
            Ok(Some(true))
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(Some(false))
        } else {
            Err(Ec2Error::invalid_parameter_value(format!(
                "Invalid value '{raw}' for {key}. Expected a boolean."
            )))
        }
    }

    /// Whether the request sets `DryRun=true`.
    pub fn is_dry_run(&self) -> Result<bool, Ec2Error> {
        Ok(self.get_bool("DryRun")?.unwrap_or(false))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(inner: HashMap<String, String>) -> Self {
        Self { inner }
    }
}
