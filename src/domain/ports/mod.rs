use crate::domain::models::{
    content::ContentPatch,
    listing::{ListFilter, SortOptions},
    post::Post,
    recipe::{NewRecipeEvent, Recipe},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use tokio::sync::broadcast;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

/// Recipe persistence. Writes that require ownership take the author id and
/// fold it into the statement filter, so authorization and mutation happen in
/// one store operation.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, AppError>;
    async fn list(&self, filter: &ListFilter, sort: &SortOptions) -> Result<Vec<Recipe>, AppError>;
    async fn update_owned(&self, author_id: &str, id: &str, patch: &ContentPatch) -> Result<Option<Recipe>, AppError>;
    async fn delete_owned(&self, author_id: &str, id: &str) -> Result<u64, AppError>;
    /// Set-add on `liked_by`. `None` when the recipe does not exist.
    async fn add_like(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, AppError>;
    /// Set-remove on `liked_by`. `None` when the recipe does not exist.
    async fn remove_like(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, AppError>;
    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Recipe>, AppError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> Result<Post, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError>;
    async fn list(&self, filter: &ListFilter, sort: &SortOptions) -> Result<Vec<Post>, AppError>;
    async fn update_owned(&self, author_id: &str, id: &str, patch: &ContentPatch) -> Result<Option<Post>, AppError>;
    async fn delete_owned(&self, author_id: &str, id: &str) -> Result<u64, AppError>;
}

pub trait RecipeNotifier: Send + Sync {
    /// Fire-and-forget; having no listeners is not an error.
    fn publish(&self, event: NewRecipeEvent);
    fn subscribe(&self) -> broadcast::Receiver<NewRecipeEvent>;
}
