//! Post operations: validation before persistence, timestamps, and not-found shaping.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{NewPost, Post, PostId};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;
use crate::query::{ListQuery, Page};
use crate::validation::PostInput;

const ENTITY: &str = "Post";

/// Orchestrates the validator and the repository for each post operation.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Post>, DomainError> {
        Ok(self.repo.list(query).await?)
    }

    pub async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Validate and insert. Nothing is written when validation fails.
    pub async fn create(&self, input: PostInput) -> Result<Post, DomainError> {
        let valid = input.validate().map_err(DomainError::Validation)?;
        let post = self.repo.insert(NewPost::from_valid(valid, Utc::now())).await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Look up, validate, then overwrite.
    ///
    /// A missing id wins over a bad payload: the lookup runs first.
    pub async fn update(&self, id: PostId, input: PostInput) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        let valid = input.validate().map_err(DomainError::Validation)?;

        post.apply(valid, Utc::now());
        let post = self.repo.update(post).await.map_err(|e| match e {
            RepoError::NotFound => not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn not_found(id: PostId) -> DomainError {
    DomainError::NotFound {
        entity_type: ENTITY,
        id: id.to_string(),
    }
}
