//! Error bodies: RFC 7807 problem details, and the field-keyed validation body.

use serde::{Deserialize, Serialize};

use blogsite_core::error::FieldErrors;

/// Body of a rejected write: `{"errors": {field: [messages]}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: FieldErrors,
}

impl ValidationErrorResponse {
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }
}

/// RFC 7807 problem body, used for every non-validation failure.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,

    /// Short summary of the status, e.g. "Not Found".
    pub title: String,

    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
