//! EC2 codec configuration.

use std::env;
use std::str::FromStr;

use ruststack_ec2_xml::{DEFAULT_INDENT, RenderOptions};

use crate::filter::UnknownFilterPolicy;
use crate::pagination::DEFAULT_MAX_RESULTS;

/// EC2 codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ec2Config {
    /// Page size when a request carries no `MaxResults`.
    pub default_max_results: usize,
    /// How unknown filter names are treated.
    pub unknown_filter_policy: UnknownFilterPolicy,
    /// Spaces per XML indentation level.
    pub xml_indent: usize,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Ec2Config {
    fn default() -> Self {
        Self {
            default_max_results: DEFAULT_MAX_RESULTS,
            unknown_filter_policy: UnknownFilterPolicy::default(),
            xml_indent: DEFAULT_INDENT,
            log_level: "info".to_owned(),
        }
    }
}

impl Ec2Config {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Values that fail to parse keep their default and log a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            default_max_results: parse_or(
                &lookup,
                "EC2_DEFAULT_MAX_RESULTS",
                defaults.default_max_results,
            ),
            unknown_filter_policy: parse_or(
                &lookup,
                "EC2_UNKNOWN_FILTER_POLICY",
                defaults.unknown_filter_policy,
            ),
            xml_indent: parse_or(&lookup, "EC2_XML_INDENT", defaults.xml_indent),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Base rendering options for every action.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new().with_indent(self.xml_indent)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "invalid configuration value, using default");
            default
        }
    }
}
