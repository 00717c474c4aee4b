//! Post listing: search filter, newest-first ordering and page slicing.
//!
//! A [`ListQuery`] is a plain description of the listing (filter text,
//! ordering key, offset/limit). SQL repositories translate it into a query,
//! and [`ListQuery::apply`] evaluates it over an in-memory collection with
//! exactly the same rules.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::domain::Post;

/// Page size used when none is configured.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Upper bound for a client-requested page size.
pub const MAX_PER_PAGE: u64 = 100;

/// Listing parameters exactly as they arrive on the query string.
///
/// Kept as text so malformed numbers can fall back to defaults instead of
/// failing the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// Resolve raw parameters into a query.
    ///
    /// - `page`: non-numeric or below 1 becomes 1.
    /// - `per_page`: non-numeric or below 1 becomes `default_per_page`,
    ///   and is capped at [`MAX_PER_PAGE`].
    /// - `search`: trimmed; blank means no filter.
    pub fn into_query(self, default_per_page: u64) -> ListQuery {
        let page = parse_positive(self.page.as_deref()).unwrap_or(1);
        let per_page = parse_positive(self.per_page.as_deref()).unwrap_or(default_per_page);

        ListQuery::new(page, per_page).with_search(self.search)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .map(|n| n as u64)
}

/// A filtered, ordered, paginated view over the post collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search: Option<String>,
    page: u64,
    per_page: u64,
}

impl ListQuery {
    pub fn new(page: u64, per_page: u64) -> Self {
        let per_page = if per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            per_page.min(MAX_PER_PAGE)
        };

        Self {
            search: None,
            page: page.max(1),
            per_page,
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Rows to skip before the requested page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }

    /// Case-insensitive substring match on title, content or excerpt.
    pub fn matches(&self, post: &Post) -> bool {
        let Some(needle) = self.search.as_deref().map(str::to_lowercase) else {
            return true;
        };

        post.title.to_lowercase().contains(&needle)
            || post.content.to_lowercase().contains(&needle)
            || post
                .excerpt
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle))
    }

    /// Evaluate the query over an in-memory collection.
    pub fn apply<I>(&self, posts: I) -> Page<Post>
    where
        I: IntoIterator<Item = Post>,
    {
        let mut matched: Vec<Post> = posts.into_iter().filter(|p| self.matches(p)).collect();
        matched.sort_by(newest_first);

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit()).unwrap_or(usize::MAX))
            .collect();

        Page::new(items, total, self)
    }
}

/// Listing order: `created_at` descending, then `id` descending.
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// One page of results plus the counts needed to navigate.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches after filtering, before pagination.
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, query: &ListQuery) -> Self {
        Self {
            items,
            total,
            page: query.page(),
            per_page: query.per_page(),
        }
    }

    pub fn pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn post(id: i64, minutes: i64, title: &str) -> Post {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
        Post {
            id,
            title: title.to_string(),
            content: format!("Body of {title}"),
            excerpt: None,
            featured_image: None,
            published: true,
            created_at: at,
            updated_at: at,
        }
    }

    fn params(page: Option<&str>, per_page: Option<&str>, search: Option<&str>) -> ListParams {
        ListParams {
            page: page.map(String::from),
            per_page: per_page.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn returns_most_recent_first() {
        let posts = vec![post(1, 0, "a"), post(2, 10, "b"), post(3, 5, "c")];
        let page = ListQuery::new(1, 2).apply(posts);

        let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(page.total, 3);
        assert_eq!(page.pages(), 2);
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn equal_timestamps_break_ties_by_id() {
        let posts = vec![post(4, 0, "a"), post(9, 0, "b"), post(6, 0, "c")];
        let page = ListQuery::new(1, 10).apply(posts);

        let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 6, 4]);
    }

    #[test]
    fn page_count_is_ceiling() {
        for (n, k, expected) in [(0, 3, 0), (1, 3, 1), (3, 3, 1), (4, 3, 2), (10, 1, 10)] {
            let posts = (0..n).map(|i| post(i, i, "t"));
            let page = ListQuery::new(1, k).apply(posts);
            assert_eq!(page.pages(), expected, "n={n} k={k}");
        }
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let posts: Vec<_> = (0..5).map(|i| post(i, i, "t")).collect();
        let page = ListQuery::new(4, 2).apply(posts);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.pages(), 3);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn search_is_case_insensitive_over_three_fields() {
        let mut with_excerpt = post(3, 2, "Third");
        with_excerpt.excerpt = Some("All about FLASK".into());
        let posts = vec![
            post(1, 0, "Flask Tutorial"),
            post(2, 1, "Unrelated"),
            with_excerpt,
        ];

        let query = ListQuery::new(1, 10).with_search(Some("flask".into()));
        let ids: Vec<_> = query.apply(posts.clone()).items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);

        let none = ListQuery::new(1, 10).with_search(Some("zzznomatch".into()));
        assert_eq!(none.apply(posts).total, 0);
    }

    #[test]
    fn search_matches_content() {
        let posts = vec![post(1, 0, "Title")];
        let query = ListQuery::new(1, 10).with_search(Some("BODY OF".into()));
        assert_eq!(query.apply(posts).total, 1);
    }

    #[test]
    fn blank_search_is_no_filter() {
        let query = ListQuery::new(1, 10).with_search(Some("   ".into()));
        assert_eq!(query.search(), None);
    }

    #[test]
    fn raw_params_fall_back_to_defaults() {
        let q = params(None, None, None).into_query(10);
        assert_eq!((q.page(), q.per_page()), (1, 10));

        let q = params(Some("abc"), Some("-3"), None).into_query(7);
        assert_eq!((q.page(), q.per_page()), (1, 7));

        let q = params(Some("0"), Some("0"), None).into_query(10);
        assert_eq!((q.page(), q.per_page()), (1, 10));

        let q = params(Some("3"), Some("5000"), Some(" flask ")).into_query(10);
        assert_eq!((q.page(), q.per_page()), (3, MAX_PER_PAGE));
        assert_eq!(q.search(), Some("flask"));
        assert_eq!(q.offset(), 200);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let q = ListQuery::new(u64::MAX, 10);
        assert_eq!(q.offset(), u64::MAX);
        assert!(q.apply(vec![post(1, 0, "t")]).items.is_empty());
    }
}
