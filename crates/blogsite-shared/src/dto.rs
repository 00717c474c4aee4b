//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use blogsite_core::domain::Post;
use blogsite_core::query::Page;

/// Transport shape of a post. Timestamps are ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            featured_image: post.featured_image,
            published: post.published,
            created_at: Some(iso8601(post.created_at)),
            updated_at: Some(iso8601(post.updated_at)),
        }
    }
}

/// Pagination envelope for list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    /// Build the envelope, converting each item.
    pub fn from_page<S>(page: Page<S>) -> Self
    where
        T: From<S>,
    {
        let pages = page.pages();
        let has_next = page.has_next();
        let has_prev = page.has_prev();
        let page = page.map(T::from);

        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            pages,
            has_next,
            has_prev,
        }
    }
}

/// Plain confirmation body, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogsite_core::query::ListQuery;
    use chrono::TimeZone;

    fn post(id: i64) -> Post {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        Post {
            id,
            title: "Working with PostgreSQL".into(),
            content: "PostgreSQL is a powerful database".into(),
            excerpt: None,
            featured_image: None,
            published: true,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn post_serializes_with_every_key() {
        let json = serde_json::to_value(PostResponse::from(post(1))).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "Working with PostgreSQL",
                "content": "PostgreSQL is a powerful database",
                "excerpt": null,
                "featured_image": null,
                "published": true,
                "created_at": "2024-05-06T07:08:09.000000Z",
                "updated_at": "2024-05-06T07:08:09.000000Z",
            })
        );
    }

    #[test]
    fn envelope_carries_navigation_flags() {
        let query = ListQuery::new(2, 2);
        let page = Page::new(vec![post(1)], 3, &query);
        let envelope: PaginatedResponse<PostResponse> = PaginatedResponse::from_page(page);

        assert_eq!(envelope.pages, 2);
        assert!(!envelope.has_next);
        assert!(envelope.has_prev);
        assert_eq!(envelope.items.len(), 1);
    }
}
