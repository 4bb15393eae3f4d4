use std::sync::Arc;
use crate::domain::{
    models::{
        content::{ContentDraft, ContentPatch},
        listing::{ListFilter, SortOptions},
        recipe::Recipe,
    },
    ports::{RecipeRepository, UserRepository},
};
use crate::error::AppError;
use tracing::{debug, info, warn};

pub const DEFAULT_POPULAR_LIMIT: i64 = 10;
pub const MAX_POPULAR_LIMIT: i64 = 100;

/// Recipe queries and author-guarded writes.
///
/// Lookups that find nothing return `None`, an empty list or a zero count.
/// Update and delete do not distinguish a missing recipe from one owned by
/// somebody else; both come back as `None` / `0`.
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    users: Arc<dyn UserRepository>,
}

impl RecipeService {
    pub fn new(recipes: Arc<dyn RecipeRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { recipes, users }
    }

    pub async fn create(&self, author_id: &str, draft: ContentDraft) -> Result<Recipe, AppError> {
        let title = draft.require_title()?;
        // A token can outlive its user.
        if self.users.find_by_id(author_id).await?.is_none() {
            warn!("Rejected recipe from unknown author {}", author_id);
            return Err(AppError::Unauthorized);
        }
        let recipe = Recipe::new(author_id.to_string(), title, draft);
        let created = self.recipes.create(&recipe).await?;
        info!("Created recipe {} by {}", created.id, created.author);
        Ok(created)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, AppError> {
        self.recipes.find_by_id(id).await
    }

    pub async fn list_all(&self, sort: SortOptions) -> Result<Vec<Recipe>, AppError> {
        self.recipes.list(&ListFilter::All, &sort).await
    }

    pub async fn list_by_author_username(&self, username: &str, sort: SortOptions) -> Result<Vec<Recipe>, AppError> {
        match self.users.find_by_username(username).await? {
            Some(user) => self.recipes.list(&ListFilter::Author(user.id), &sort).await,
            None => {
                debug!("No user named {}, returning no recipes", username);
                Ok(Vec::new())
            }
        }
    }

    pub async fn list_by_tags(&self, tags: &[String], sort: SortOptions) -> Result<Vec<Recipe>, AppError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        self.recipes.list(&ListFilter::Tags(tags.to_vec()), &sort).await
    }

    pub async fn update(&self, user_id: &str, recipe_id: &str, patch: ContentPatch) -> Result<Option<Recipe>, AppError> {
        let patch = patch.normalized()?;
        let updated = self.recipes.update_owned(user_id, recipe_id, &patch).await?;
        if updated.is_some() {
            info!("Updated recipe {}", recipe_id);
        }
        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, recipe_id: &str) -> Result<u64, AppError> {
        let deleted = self.recipes.delete_owned(user_id, recipe_id).await?;
        if deleted > 0 {
            info!("Deleted recipe {}", recipe_id);
        }
        Ok(deleted)
    }

    pub async fn like(&self, user_id: &str, recipe_id: &str) -> Result<Option<Recipe>, AppError> {
        self.recipes.add_like(recipe_id, user_id).await
    }

    pub async fn unlike(&self, user_id: &str, recipe_id: &str) -> Result<Option<Recipe>, AppError> {
        self.recipes.remove_like(recipe_id, user_id).await
    }

    /// Most liked first, newer recipes winning ties.
    pub async fn top_by_likes(&self, limit: i64) -> Result<Vec<Recipe>, AppError> {
        self.recipes.top_by_likes(limit.clamp(1, MAX_POPULAR_LIMIT)).await
    }
}
