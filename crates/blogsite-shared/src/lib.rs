//! # Blogsite Shared
//!
//! Wire types for the REST API: the serialized post, the pagination
//! envelope and error bodies.

pub mod dto;
pub mod response;

pub use dto::{MessageResponse, PaginatedResponse, PostResponse};
pub use response::{ErrorResponse, ValidationErrorResponse};
