//! Error handling - maps domain failures onto HTTP responses.
//!
//! Validation failures produce `{"errors": {field: [messages]}}`; everything
//! else produces an RFC 7807 problem body.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error, http::StatusCode, web};
use blogsite_core::error::{DomainError, FieldErrors, RepoError};
use blogsite_shared::{ErrorResponse, ValidationErrorResponse};

/// Key used for errors that concern the body as a whole.
pub const SCHEMA_FIELD: &str = "_schema";

/// Application-level error type returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation errors: {0}")]
    Validation(FieldErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(errors) => {
                response.json(ValidationErrorResponse::new(errors.clone()))
            }
            AppError::NotFound(detail) => response.json(ErrorResponse::not_found(detail)),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                response.json(ErrorResponse::internal_error())
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Repo(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) | RepoError::Constraint(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Malformed JSON bodies share the validation error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let mut errors = FieldErrors::new();
        errors.add(SCHEMA_FIELD, err.to_string());
        error::Error::from(AppError::Validation(errors))
    })
}

/// Non-numeric ids cannot name a post.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req: &HttpRequest| {
        tracing::debug!(path = %req.path(), error = %err, "Unroutable post id");
        error::Error::from(AppError::NotFound(format!("No resource at {}", req.path())))
    })
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
