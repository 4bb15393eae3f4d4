use std::sync::Arc;
use crate::domain::{
    models::{
        content::{ContentDraft, ContentPatch},
        listing::{ListFilter, SortOptions},
        post::Post,
    },
    ports::{PostRepository, UserRepository},
};
use crate::error::AppError;
use tracing::{info, warn};

/// Same contract as `RecipeService`, without likes.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    pub async fn create(&self, author_id: &str, draft: ContentDraft) -> Result<Post, AppError> {
        let title = draft.require_title()?;
        if self.users.find_by_id(author_id).await?.is_none() {
            warn!("Rejected post from unknown author {}", author_id);
            return Err(AppError::Unauthorized);
        }
        let created = self.posts.create(&Post::new(author_id.to_string(), title, draft)).await?;
        info!("Created post {} by {}", created.id, created.author);
        Ok(created)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        self.posts.find_by_id(id).await
    }

    pub async fn list_all(&self, sort: SortOptions) -> Result<Vec<Post>, AppError> {
        self.posts.list(&ListFilter::All, &sort).await
    }

    pub async fn list_by_author_username(&self, username: &str, sort: SortOptions) -> Result<Vec<Post>, AppError> {
        match self.users.find_by_username(username).await? {
            Some(user) => self.posts.list(&ListFilter::Author(user.id), &sort).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn list_by_tags(&self, tags: &[String], sort: SortOptions) -> Result<Vec<Post>, AppError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        self.posts.list(&ListFilter::Tags(tags.to_vec()), &sort).await
    }

    pub async fn update(&self, user_id: &str, post_id: &str, patch: ContentPatch) -> Result<Option<Post>, AppError> {
        let patch = patch.normalized()?;
        self.posts.update_owned(user_id, post_id, &patch).await
    }

    pub async fn delete(&self, user_id: &str, post_id: &str) -> Result<u64, AppError> {
        let deleted = self.posts.delete_owned(user_id, post_id).await?;
        if deleted > 0 {
            info!("Deleted post {}", post_id);
        }
        Ok(deleted)
    }
}
