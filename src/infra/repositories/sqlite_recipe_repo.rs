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
use sqlx::{types::Json, SqlitePool};
use tracing::error;

pub struct SqliteRecipeRepo {
    pool: SqlitePool,
}

impl SqliteRecipeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for SqliteRecipeRepo {
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, AppError> {
        sqlx::query_as::<_, Recipe>(
            r#"INSERT INTO recipes (
                id, title, content, ingredients, image_url, tags, author, liked_by, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
        sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
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
                let sql = format!("SELECT * FROM recipes WHERE author = ? {}", order_by);
                sqlx::query_as::<_, Recipe>(&sql)
                    .bind(author_id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
            ListFilter::Tags(tags) => {
                let sql = format!(
                    r#"SELECT * FROM recipes
                    WHERE EXISTS (
                        SELECT 1 FROM json_each(recipes.tags) AS t
                        WHERE t.value IN (SELECT q.value FROM json_each(?) AS q)
                    ) {}"#,
                    order_by
                );
                sqlx::query_as::<_, Recipe>(&sql)
                    .bind(Json(tags))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
        }
    }

    async fn update_owned(&self, author_id: &str, id: &str, patch: &ContentPatch) -> Result<Option<Recipe>, AppError> {
        sqlx::query_as::<_, Recipe>(
            r#"UPDATE recipes SET
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
        let result = sqlx::query("DELETE FROM recipes WHERE id = ? AND author = ?")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite recipe deletion failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected())
    }

    async fn add_like(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, AppError> {
        // Single statement: the membership check and the append see the same row version.
        sqlx::query_as::<_, Recipe>(
            r#"UPDATE recipes SET
                liked_by = CASE
                    WHEN EXISTS (SELECT 1 FROM json_each(recipes.liked_by) WHERE value = ?) THEN liked_by
                    ELSE json_insert(liked_by, '$[#]', ?)
                END,
                updated_at = CASE
                    WHEN EXISTS (SELECT 1 FROM json_each(recipes.liked_by) WHERE value = ?) THEN updated_at
                    ELSE ?
                END
            WHERE id = ?
            RETURNING *"#
        )
            .bind(user_id)
            .bind(user_id)
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
                liked_by = (SELECT json_group_array(value) FROM json_each(recipes.liked_by) WHERE value <> ?),
                updated_at = CASE
                    WHEN EXISTS (SELECT 1 FROM json_each(recipes.liked_by) WHERE value = ?) THEN ?
                    ELSE updated_at
                END
            WHERE id = ?
            RETURNING *"#
        )
            .bind(user_id)
            .bind(user_id)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Recipe>, AppError> {
        sqlx::query_as::<_, Recipe>(
            "SELECT * FROM recipes ORDER BY json_array_length(liked_by) DESC, created_at DESC LIMIT ?"
        )
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
