use crate::domain::{
    models::{
        content::ContentPatch,
        listing::{ListFilter, SortOptions},
        post::Post,
    },
    ports::PostRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, SqlitePool};
use tracing::error;

pub struct SqlitePostRepo {
    pool: SqlitePool,
}

impl SqlitePostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepo {
    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            r#"INSERT INTO posts (
                id, title, content, ingredients, image_url, tags, author, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&post.id)
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.ingredients)
            .bind(&post.image_url)
            .bind(&post.tags)
            .bind(&post.author)
            .bind(post.created_at)
            .bind(post.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &ListFilter, sort: &SortOptions) -> Result<Vec<Post>, AppError> {
        let order_by = sort.order_by_clause();
        match filter {
            ListFilter::All => {
                let sql = format!("SELECT * FROM posts {}", order_by);
                sqlx::query_as::<_, Post>(&sql)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
            ListFilter::Author(author_id) => {
                let sql = format!("SELECT * FROM posts WHERE author = ? {}", order_by);
                sqlx::query_as::<_, Post>(&sql)
                    .bind(author_id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
            ListFilter::Tags(tags) => {
                let sql = format!(
                    r#"SELECT * FROM posts
                    WHERE EXISTS (
                        SELECT 1 FROM json_each(posts.tags) AS t
                        WHERE t.value IN (SELECT q.value FROM json_each(?) AS q)
                    ) {}"#,
                    order_by
                );
                sqlx::query_as::<_, Post>(&sql)
                    .bind(Json(tags))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
        }
    }

    async fn update_owned(&self, author_id: &str, id: &str, patch: &ContentPatch) -> Result<Option<Post>, AppError> {
        sqlx::query_as::<_, Post>(
            r#"UPDATE posts SET
                title = COALESCE(?, title),
                content = CASE WHEN ? THEN ? ELSE content END,
                ingredients = COALESCE(?, ingredients),
                tags = COALESCE(?, tags),
                image_url = CASE WHEN ? THEN ? ELSE image_url END,
                updated_at = ?
            WHERE id = ? AND author = ?
            RETURNING *"#
        )
            .bind(&patch.title)
            .bind(patch.content.is_some())
            .bind(patch.content.as_ref().and_then(|c| c.as_deref()))
            .bind(patch.ingredients.as_ref().map(Json))
            .bind(patch.tags.as_ref().map(Json))
            .bind(patch.image_url.is_some())
            .bind(patch.image_url.as_ref().and_then(|u| u.as_deref()))
            .bind(Utc::now())
            .bind(id)
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_owned(&self, author_id: &str, id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ? AND author = ?")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite post deletion failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected())
    }
}
