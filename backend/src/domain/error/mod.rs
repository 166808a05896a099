//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the [`ErrorCode`] carries the failure category and the optional
//! `details` payload carries structured context such as field violations.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// One or more request fields failed their declared constraints.
    ValidationFailed,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Where a request field was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// A path segment.
    Path,
    /// A query string parameter.
    Query,
    /// A field of the JSON request body.
    Body,
    /// A URL-encoded or multipart form field.
    Form,
    /// A multipart file part.
    File,
}

/// A single failed constraint on a single field.
///
/// `field` is absent when the decoder could not attribute the failure to a
/// named field (for example a malformed JSON document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Violation {
    /// Parameter source the field was read from.
    pub location: FieldSource,
    /// Field name as declared on the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "age")]
    pub field: Option<String>,
    /// Constraint identifier, e.g. `length`, `range`, `email`, `decode`.
    #[schema(example = "range")]
    pub code: String,
    /// Human-readable description of the failure.
    #[schema(example = "age must be greater than 0 and at most 115")]
    pub message: String,
}

impl Violation {
    /// Build a violation attributed to a named field.
    #[must_use]
    pub fn new(
        location: FieldSource,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location,
            field: Some(field.into()),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Build a violation that cannot be tied to one field.
    #[must_use]
    pub fn unattributed(
        location: FieldSource,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location,
            field: None,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// API error response payload.
///
/// # Examples
/// ```
/// use roster::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "missing");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[expect(
    clippy::error_impl_error,
    reason = "handlers and extractors share one envelope type named after its role"
)]
pub struct Error {
    #[schema(example = "validation_failed")]
    code: ErrorCode,
    #[schema(example = "request validation failed")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated with the `Trace-Id` response header.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, if one was captured.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// A validation failure listing every violated constraint.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::{Error, ErrorCode, FieldSource, Violation};
    ///
    /// let err = Error::validation(vec![Violation::new(
    ///     FieldSource::Query,
    ///     "age",
    ///     "decode",
    ///     "missing field `age`",
    /// )]);
    /// assert_eq!(err.code(), ErrorCode::ValidationFailed);
    /// assert_eq!(err.violations().len(), 1);
    /// ```
    #[must_use]
    pub fn validation(violations: Vec<Violation>) -> Self {
        Self::new(ErrorCode::ValidationFailed, "request validation failed")
            .with_details(json!({ "violations": violations }))
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Violations carried in `details`, if this is a validation failure.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        self.details
            .as_ref()
            .and_then(|details| details.get("violations"))
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
