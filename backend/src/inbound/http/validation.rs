//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, UserValidationError};

/// Validation error codes owned by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, message: impl Into<String>, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        format!("missing required field: {field}"),
        ErrorCode::MissingField.as_str(),
    )
}

/// Unwrap an optional body field or report it as missing.
pub(crate) fn require_field<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Translate a domain validation failure into an `invalid_request` error.
pub(crate) fn user_validation_error(err: UserValidationError) -> Error {
    field_error(err.field(), err.to_string(), err.code())
}
