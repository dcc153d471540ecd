//! EC2 error types.
//!
//! EC2 Query API errors are rendered as
//! `<Response><Errors><Error><Code>..</Code><Message>..</Message></Error></Errors>`
//! with a trailing `<RequestID>`. [`Ec2Error`] is the in-process error value;
//! [`ErrorEnvelope`] is the data-only `{Code, Message}` shape the serializer
//! recognizes.

use std::fmt;

/// Broad error classes shared by every EC2 backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required parameter is missing or malformed.
    Parameter,
    /// A referenced resource id does not exist.
    NotFound,
    /// A successful dry-run short-circuit.
    DryRun,
    /// The operation is blocked by live references from other resources.
    DependencyViolation,
    /// A value violates an action-specific range or enum constraint.
    DomainValidation,
    /// Unexpected failure inside the service.
    Internal,
}

/// EC2 error codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Ec2ErrorCode {
    /// The request would have succeeded but `DryRun` was set.
    DryRunOperation,
    /// A required parameter was not supplied.
    MissingParameter,
    /// A parameter value is malformed or out of range.
    #[default]
    InvalidParameterValue,
    /// Two parameters cannot be used together.
    InvalidParameterCombination,
    /// A filter name is not supported by the action.
    InvalidFilter,
    /// A pagination token cannot be used.
    InvalidNextToken,
    /// The resource is still referenced by other resources.
    DependencyViolation,
    /// No `Action` parameter was supplied.
    MissingAction,
    /// The `Action` parameter names an unknown action.
    InvalidAction,
    /// Internal server error.
    InternalError,
    /// `Invalid<Resource>ID.NotFound`; holds the complete code string.
    ResourceNotFound(String),
    /// Any other backend-specific code, such as `IncorrectState`.
    Custom(String),
}

impl Ec2ErrorCode {
    /// Build the `Invalid<Resource>ID.NotFound` code for a resource family.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::ResourceNotFound(format!("Invalid{resource}ID.NotFound"))
    }

    /// Returns the wire code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DryRunOperation => "DryRunOperation",
            Self::MissingParameter => "MissingParameter",
            Self::InvalidParameterValue => "InvalidParameterValue",
            Self::InvalidParameterCombination => "InvalidParameterCombination",
            Self::InvalidFilter => "InvalidFilter",
            Self::InvalidNextToken => "InvalidNextToken",
            Self::DependencyViolation => "DependencyViolation",
            Self::MissingAction => "MissingAction",
            Self::InvalidAction => "InvalidAction",
            Self::InternalError => "InternalError",
            Self::ResourceNotFound(code) | Self::Custom(code) => code,
        }
    }

    /// Returns the error class of this code.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameter
            | Self::InvalidParameterValue
            | Self::InvalidParameterCombination
            | Self::InvalidFilter
            | Self::InvalidNextToken
            | Self::MissingAction
            | Self::InvalidAction => ErrorKind::Parameter,
            Self::ResourceNotFound(_) => ErrorKind::NotFound,
            Self::DryRunOperation => ErrorKind::DryRun,
            Self::DependencyViolation => ErrorKind::DependencyViolation,
            Self::Custom(_) => ErrorKind::DomainValidation,
            Self::InternalError => ErrorKind::Internal,
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::DryRunOperation => http::StatusCode::PRECONDITION_FAILED,
            Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for Ec2ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An EC2 error response.
#[derive(Debug)]
pub struct Ec2Error {
    /// The error code.
    pub code: Ec2ErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Ec2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ec2Error({}): {}", self.code, self.message)
    }
}

impl std::error::Error for Ec2Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl Ec2Error {
    /// Create a new `Ec2Error` from an error code.
    #[must_use]
    pub fn new(code: Ec2ErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `Ec2Error` with a custom message.
    #[must_use]
    pub fn with_message(code: Ec2ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The error class.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// The data-only `{Code, Message}` form of this error.
    #[must_use]
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.code.as_str(), self.message.clone())
    }

    // -- Convenience constructors --

    /// Successful dry run.
    #[must_use]
    pub fn dry_run() -> Self {
        Self::with_message(
            Ec2ErrorCode::DryRunOperation,
            "Request would have succeeded, but DryRun flag is set.",
        )
    }

    /// Required parameter not supplied.
    #[must_use]
    pub fn missing_parameter(name: &str) -> Self {
        Self::with_message(
            Ec2ErrorCode::MissingParameter,
            format!("The request must contain the parameter {name}"),
        )
    }

    /// Malformed or out-of-range parameter value.
    #[must_use]
    pub fn invalid_parameter_value(message: impl Into<String>) -> Self {
        Self::with_message(Ec2ErrorCode::InvalidParameterValue, message)
    }

    /// Mutually exclusive parameters supplied together.
    #[must_use]
    pub fn invalid_parameter_combination(message: impl Into<String>) -> Self {
        Self::with_message(Ec2ErrorCode::InvalidParameterCombination, message)
    }

    /// Filter name the action does not support.
    #[must_use]
    pub fn invalid_filter(name: &str) -> Self {
        Self::with_message(
            Ec2ErrorCode::InvalidFilter,
            format!("The filter '{name}' is invalid"),
        )
    }

    /// `Invalid<Resource>ID.NotFound` for the given resource family and id.
    ///
    /// `resource` is the PascalCase family name used in the code, e.g.
    /// `Subnet` or `NetworkInterface`; the message starts it lowercase.
    #[must_use]
    pub fn not_found(resource: &str, id: &str) -> Self {
        let mut chars = resource.chars();
        let noun: String = chars
            .next()
            .map(|first| first.to_lowercase().chain(chars).collect())
            .unwrap_or_default();
        Self::with_message(
            Ec2ErrorCode::not_found(resource),
            format!("The {noun} ID '{id}' does not exist"),
        )
    }

    /// Resource still referenced by other resources.
    #[must_use]
    pub fn dependency_violation(message: impl Into<String>) -> Self {
        Self::with_message(Ec2ErrorCode::DependencyViolation, message)
    }

    /// Backend-specific error code.
    #[must_use]
    pub fn custom(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_message(Ec2ErrorCode::Custom(code.into()), message)
    }

    /// Internal server error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(Ec2ErrorCode::InternalError, message)
    }

    /// Missing `Action` parameter.
    #[must_use]
    pub fn missing_action() -> Self {
        Self::with_message(
            Ec2ErrorCode::MissingAction,
            "The request must contain the parameter Action",
        )
    }

    /// Unknown action.
    #[must_use]
    pub fn invalid_action(action: &str) -> Self {
        Self::with_message(
            Ec2ErrorCode::InvalidAction,
            format!("The action {action} is not valid for this web service."),
        )
    }
}

/// The canonical `{Code, Message}` error shape.
///
/// Any backend result of this shape short-circuits response rendering into
/// the EC2 error document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorEnvelope {
    /// The wire error code.
    pub code: String,
    /// A human-readable error message.
    pub message: String,
}

impl ErrorEnvelope {
    /// Create a new envelope.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&Ec2Error> for ErrorEnvelope {
    fn from(err: &Ec2Error) -> Self {
        err.envelope()
    }
}

impl From<Ec2Error> for ErrorEnvelope {
    fn from(err: Ec2Error) -> Self {
        Self {
            code: err.code.as_str().to_owned(),
            message: err.message,
        }
    }
}

/// Create an `Ec2Error` from an error code.
///
/// # Examples
///
/// ```
/// use ruststack_ec2_model::ec2_error;
/// use ruststack_ec2_model::error::Ec2ErrorCode;
///
/// let err = ec2_error!(MissingParameter);
/// assert_eq!(err.code, Ec2ErrorCode::MissingParameter);
///
/// let err = ec2_error!(InvalidParameterValue, "MaxResults must be positive");
/// assert_eq!(err.message, "MaxResults must be positive");
/// ```
#[macro_export]
macro_rules! ec2_error {
    ($code:ident) => {
        $crate::error::Ec2Error::new($crate::error::Ec2ErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::Ec2Error::with_message($crate::error::Ec2ErrorCode::$code, $msg)
    };
}
