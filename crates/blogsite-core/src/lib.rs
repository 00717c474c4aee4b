//! # Blogsite Core
//!
//! The domain layer of the blog backend.
//! This crate contains the post model, write validation, the listing query
//! engine and the repository port, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod query;
pub mod service;
pub mod validation;

pub use error::{DomainError, FieldErrors, RepoError};
pub use query::{ListParams, ListQuery, Page};
pub use service::PostService;
pub use validation::PostInput;
