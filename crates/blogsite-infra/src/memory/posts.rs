//! In-memory post repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blogsite_core::domain::{NewPost, Post, PostId};
use blogsite_core::error::RepoError;
use blogsite_core::ports::PostRepository;
use blogsite_core::query::{ListQuery, Page};

struct Store {
    posts: BTreeMap<PostId, Post>,
    next_id: PostId,
}

/// Post repository backed by a `BTreeMap` behind an async `RwLock`.
///
/// Ids are handed out monotonically starting at 1 and never reused.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                posts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;

        let post = post.with_id(id);
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let slot = store.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Post>, RepoError> {
        let store = self.store.read().await;
        tracing::debug!(search = ?query.search(), page = query.page(), "Listing posts in memory");
        Ok(query.apply(store.posts.values().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_post(title: &str) -> NewPost {
        let now = Utc::now();
        NewPost {
            title: title.to_string(),
            content: "Some content for the post".to_string(),
            excerpt: None,
            featured_image: None,
            published: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = InMemoryPostRepository::new();
        let a = repo.insert(new_post("first")).await.unwrap();
        let b = repo.insert(new_post("second")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryPostRepository::new();
        let a = repo.insert(new_post("first")).await.unwrap();
        repo.delete(a.id).await.unwrap();
        let b = repo.insert(new_post("second")).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(repo.delete(42).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_replaces_stored_post() {
        let repo = InMemoryPostRepository::new();
        let mut post = repo.insert(new_post("first")).await.unwrap();
        post.title = "renamed".to_string();
        repo.update(post.clone()).await.unwrap();

        let stored = repo.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "renamed");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let ghost = new_post("ghost").with_id(5);
        assert!(matches!(repo.update(ghost).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_uses_query_rules() {
        let repo = InMemoryPostRepository::new();
        repo.insert(new_post("Flask Tutorial")).await.unwrap();
        repo.insert(new_post("NextJS intro")).await.unwrap();

        let query = ListQuery::new(1, 10).with_search(Some("FLASK".to_string()));
        let page = repo.list(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Flask Tutorial");
    }
}
