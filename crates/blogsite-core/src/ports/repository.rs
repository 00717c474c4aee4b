use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId};
use crate::error::RepoError;
use crate::query::{ListQuery, Page};

/// Post persistence contract.
///
/// Each call is one logical unit of work; atomicity and isolation come from
/// the backing store.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// Insert a new post and return it with its assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite an existing post. Fails with `RepoError::NotFound` if the id is gone.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post by its id. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: PostId) -> Result<(), RepoError>;

    /// Run a listing query: filter, order newest first, slice one page.
    async fn list(&self, query: &ListQuery) -> Result<Page<Post>, RepoError>;
}
