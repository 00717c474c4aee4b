use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ValidPost;

/// Store-assigned post identifier.
pub type PostId = i64;

/// Post entity - a single blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated post that has not been persisted yet. The store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a write payload says about an optional column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// The key was not sent; keep whatever is stored.
    #[default]
    Absent,
    /// The key was sent as null or blank.
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Resolve against the stored value.
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::Absent => current,
            FieldUpdate::Clear => None,
            FieldUpdate::Set(value) => Some(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.resolve(None)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl NewPost {
    /// Build an insertable post, stamping both timestamps with `now`.
    ///
    /// `published` defaults to `true` when the payload left it out.
    pub fn from_valid(input: ValidPost, now: DateTime<Utc>) -> Self {
        Self {
            title: input.title,
            content: input.content,
            excerpt: input.excerpt.into_option(),
            featured_image: input.featured_image.into_option(),
            published: input.published.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the id handed out by the store.
    pub fn with_id(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            featured_image: self.featured_image,
            published: self.published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Post {
    /// Overwrite this post with a validated payload.
    ///
    /// `title` and `content` are replaced. Optional fields left out of the
    /// payload keep their stored value. `created_at` never changes and
    /// `updated_at` never moves backwards.
    pub fn apply(&mut self, input: ValidPost, now: DateTime<Utc>) {
        self.title = input.title;
        self.content = input.content;
        self.excerpt = input.excerpt.resolve(self.excerpt.take());
        self.featured_image = input.featured_image.resolve(self.featured_image.take());
        self.published = input.published.unwrap_or(self.published);
        self.updated_at = now.max(self.updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid(title: &str) -> ValidPost {
        ValidPost {
            title: title.to_string(),
            content: "Some long enough content".to_string(),
            excerpt: FieldUpdate::Absent,
            featured_image: FieldUpdate::Absent,
            published: None,
        }
    }

    #[test]
    fn new_post_defaults_published_and_stamps_both_times() {
        let now = Utc::now();
        let post = NewPost::from_valid(valid("Hello"), now);
        assert!(post.published);
        assert_eq!(post.created_at, now);
        assert_eq!(post.updated_at, now);
        assert_eq!(post.excerpt, None);
    }

    #[test]
    fn apply_keeps_absent_fields_and_clears_explicit_ones() {
        let created = Utc::now() - Duration::hours(1);
        let mut post = NewPost {
            title: "Old".into(),
            content: "Old content here".into(),
            excerpt: Some("keep me".into()),
            featured_image: Some("/img/a.png".into()),
            published: false,
            created_at: created,
            updated_at: created,
        }
        .with_id(7);

        let mut input = valid("New title");
        input.featured_image = FieldUpdate::Clear;
        let now = Utc::now();
        post.apply(input, now);

        assert_eq!(post.id, 7);
        assert_eq!(post.title, "New title");
        assert_eq!(post.excerpt.as_deref(), Some("keep me"));
        assert_eq!(post.featured_image, None);
        assert!(!post.published);
        assert_eq!(post.created_at, created);
        assert_eq!(post.updated_at, now);
    }

    #[test]
    fn apply_never_moves_updated_at_backwards() {
        let later = Utc::now() + Duration::minutes(5);
        let mut post = NewPost::from_valid(valid("Title"), later).with_id(1);
        post.apply(valid("Other"), later - Duration::minutes(10));
        assert_eq!(post.updated_at, later);
        assert!(post.created_at <= post.updated_at);
    }
}
