//! SeaORM post repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use blogsite_core::domain::{NewPost, Post, PostId};
use blogsite_core::error::RepoError;
use blogsite_core::ports::PostRepository;
use blogsite_core::query::{ListQuery, Page};

use super::entity::post::{self, Entity as PostEntity};

/// Post repository over any SeaORM connection (Postgres in production,
/// `MockDatabase` in tests).
pub struct SeaOrmPostRepository {
    pub(crate) db: DbConn,
}

impl SeaOrmPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotUpdated => RepoError::NotFound,
        other => {
            let msg = other.to_string();
            if msg.contains("duplicate") || msg.contains("unique") {
                RepoError::Constraint(msg)
            } else {
                RepoError::Query(msg)
            }
        }
    }
}

/// `%`, `_` and `\` in user text match literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `LOWER(col) LIKE '%needle%'` over title, content and excerpt, OR-ed.
///
/// A NULL excerpt makes its branch NULL, so it never matches.
fn search_condition(search: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&search.to_lowercase()));

    [
        post::Column::Title,
        post::Column::Content,
        post::Column::Excerpt,
    ]
    .into_iter()
    .fold(Condition::any(), |cond, column| {
        cond.add(
            Expr::expr(Func::lower(Expr::col(column)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .update(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Post>, RepoError> {
        tracing::debug!(
            search = ?query.search(),
            page = query.page(),
            per_page = query.per_page(),
            "Listing posts"
        );

        let mut select = PostEntity::find();
        if let Some(search) = query.search() {
            select = select.filter(search_condition(search));
        }

        let total = select.clone().count(&self.db).await.map_err(map_db_err)?;

        // Postgres offsets are signed 64-bit.
        let offset = query.offset().min(i64::MAX as u64);
        let items = select
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(query.limit())
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(Post::from)
            .collect();

        Ok(Page::new(items, total, query))
    }
}
