//! The response tree rendered into EC2 XML.
//!
//! Every backend result is expressed as a [`ResponseNode`] before rendering.
//! Objects keep field insertion order, which becomes element order on the
//! wire. `Null` fields are dropped by the serializer.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::ErrorEnvelope;

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text.
    String(String),
    /// Boolean, rendered as lowercase `true`/`false`.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
}

impl Scalar {
    /// The unescaped text form written between the element tags.
    #[must_use]
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::String(s) => Cow::Borrowed(s),
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Int(n) => Cow::Owned(n.to_string()),
            Self::Float(n) => Cow::Owned(n.to_string()),
        }
    }
}

/// A node of the response tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponseNode {
    /// Absent value; never rendered.
    #[default]
    Null,
    /// Leaf value.
    Scalar(Scalar),
    /// Ordered fields.
    Object(IndexMap<String, ResponseNode>),
    /// Ordered items.
    List(Vec<ResponseNode>),
}

/// Conversion of a domain resource into its response representation.
///
/// Every resource a backend returns implements this once, in place of
/// inspecting record shapes at render time.
pub trait ToResponseNode {
    /// Build the response tree for this value.
    fn to_response_node(&self) -> ResponseNode;
}

impl ResponseNode {
    /// Build an object from `(field, value)` pairs, keeping their order.
    #[must_use]
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ResponseNode)>,
    {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// An object with no fields.
    #[must_use]
    pub fn empty_object() -> Self {
        Self::Object(IndexMap::new())
    }

    /// Build a list from anything convertible into nodes.
    #[must_use]
    pub fn list<T, I>(items: I) -> Self
    where
        T: Into<ResponseNode>,
        I: IntoIterator<Item = T>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a list from resources.
    #[must_use]
    pub fn list_of<'a, T, I>(items: I) -> Self
    where
        T: ToResponseNode + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::List(items.into_iter().map(ToResponseNode::to_response_node).collect())
    }

    /// The `{"Error": {"Code": .., "Message": ..}}` form of an envelope.
    #[must_use]
    pub fn error(envelope: &ErrorEnvelope) -> Self {
        Self::object([(
            "Error",
            Self::object([
                ("Code", Self::from(envelope.code.as_str())),
                ("Message", Self::from(envelope.message.as_str())),
            ]),
        )])
    }

    /// Add or replace a field. Has no effect unless this node is an object.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ResponseNode>) {
        if let Self::Object(fields) = self {
            fields.insert(key.into(), value.into());
        }
    }

    /// Builder form of [`ResponseNode::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ResponseNode>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a field of an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResponseNode> {
        match self {
            Self::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// The string value of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Whether this node is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Recognize the `{"Error": {"Code": .., "Message": ..}}` shape.
    ///
    /// The outer object must contain only the `Error` field and both inner
    /// fields must be strings.
    #[must_use]
    pub fn as_error_envelope(&self) -> Option<ErrorEnvelope> {
        let Self::Object(fields) = self else {
            return None;
        };
        if fields.len() != 1 {
            return None;
        }
        let error = fields.get("Error")?;
        let code = error.get("Code")?.as_str()?;
        let message = error.get("Message")?.as_str()?;
        Some(ErrorEnvelope::new(code, message))
    }
}

impl From<&str> for ResponseNode {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::String(value.to_owned()))
    }
}

impl From<String> for ResponseNode {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::String(value))
    }
}

impl From<&String> for ResponseNode {
    fn from(value: &String) -> Self {
        Self::Scalar(Scalar::String(value.clone()))
    }
}

impl From<bool> for ResponseNode {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

macro_rules! impl_from_small_int {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ResponseNode {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::Int(i64::from(value)))
                }
            }
        )+
    };
}

impl_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ResponseNode {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Self::Scalar(Scalar::Int(n)),
            Err(_) => Self::Scalar(Scalar::String(value.to_string())),
        }
    }
}

impl From<usize> for ResponseNode {
    fn from(value: usize) -> Self {
        Self::from(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

impl From<f64> for ResponseNode {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<ErrorEnvelope> for ResponseNode {
    fn from(value: ErrorEnvelope) -> Self {
        Self::error(&value)
    }
}

/// Timestamps render as ISO 8601 with milliseconds and a `Z` suffix.
impl From<DateTime<Utc>> for ResponseNode {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Scalar(Scalar::String(
            value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        ))
    }
}

impl<T: Into<ResponseNode>> From<Option<T>> for ResponseNode {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<ResponseNode>> From<Vec<T>> for ResponseNode {
    fn from(value: Vec<T>) -> Self {
        Self::list(value)
    }
}

impl From<serde_json::Value> for ResponseNode {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::from(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Scalar(Scalar::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Self::Scalar(Scalar::Float(f))
                } else {
                    Self::Scalar(Scalar::String(n.to_string()))
                }
            }
            Value::String(s) => Self::from(s),
            Value::Array(items) => Self::list(items),
            Value::Object(fields) => Self::object(fields.into_iter().map(|(k, v)| (k, Self::from(v)))),
        }
    }
}
