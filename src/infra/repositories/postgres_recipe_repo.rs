use crate::domain::{
    models::{
        content::ContentPatch,
        listing::{ListFilter, SortOptions},
        recipe::Recipe,
    },
    ports::RecipeRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, PgPool};
use tracing::error;

pub struct PostgresRecipeRepo {
    pool: PgPool,
}

impl PostgresRecipeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepo {
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, AppError> {
        sqlx::query_as::<_, Recipe>(
            r#"INSERT INTO recipes (
                id, title, content, ingredients, image_url, tags, author, liked_by, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *"#
        )
            .bind(&recipe.id)
            .bind(&recipe.title)
            .bind(&recipe.content)
            .bind(&recipe.ingredients)
            .bind(&recipe.image_url)
            .bind(&recipe.tags)
            .bind(&recipe.author)
            .bind(&recipe.liked_by)
            .bind(recipe.created_at)
            .bind(recipe.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, AppError> {
        sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &ListFilter, sort: &SortOptions) -> Result<Vec<Recipe>, AppError> {
        let order_by = sort.order_by_clause();
        match filter {
            ListFilter::All => {
                let sql = format!("SELECT * FROM recipes {}", order_by);
                sqlx::query_as::<_, Recipe>(&sql)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
            ListFilter::Author(author_id) => {
                let sql = format!("SELECT * FROM recipes WHERE author = $1 {}", order_by);
                sqlx::query_as::<_, Recipe>(&sql)
                    .bind(author_id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
            ListFilter::Tags(tags) => {
                // `?|` is true when any of the given strings is a top-level array element.
                let sql = format!("SELECT * FROM recipes WHERE tags ?| $1 {}", order_by);
                sqlx::query_as::<_, Recipe>(&sql)
                    .bind(tags.clone())
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
        }
    }

    async fn update_owned(&self, author_id: &str, id: &str, patch: &ContentPatch) -> Result<Option<Recipe>, AppError> {
        sqlx::query_as::<_, Recipe>(
            r#"UPDATE recipes SET
                title = COALESCE($1, title),
                content = CASE WHEN $2 THEN $3 ELSE content END,
                ingredients = COALESCE($4, ingredients),
                tags = COALESCE($5, tags),
                image_url = CASE WHEN $6 THEN $7 ELSE image_url END,
                updated_at = $8
            WHERE id = $9 AND author = $10
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
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND author = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres recipe deletion failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected())
    }

    async fn add_like(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, AppError> {
        // Row-level lock taken by UPDATE serializes concurrent likes on the same recipe.
        sqlx::query_as::<_, Recipe>(
            r#"UPDATE recipes SET
                liked_by = CASE
                    WHEN liked_by ? $1 THEN liked_by
                    ELSE liked_by || jsonb_build_array($1::text)
                END,
                updated_at = CASE WHEN liked_by ? $1 THEN updated_at ELSE $2 END
            WHERE id = $3
            RETURNING *"#
        )
            .bind(user_id)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn remove_like(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, AppError> {
        sqlx::query_as::<_, Recipe>(
            r#"UPDATE recipes SET
                liked_by = liked_by - $1::text,
                updated_at = CASE WHEN liked_by ? $1 THEN $2 ELSE updated_at END
            WHERE id = $3
            RETURNING *"#
        )
            .bind(user_id)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Recipe>, AppError> {
        sqlx::query_as::<_, Recipe>(
            "SELECT * FROM recipes ORDER BY jsonb_array_length(liked_by) DESC, created_at DESC LIMIT $1"
        )
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
