use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::content::ContentDraft;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub ingredients: Json<Vec<String>>,
    pub image_url: Option<String>,
    pub tags: Json<Vec<String>>,
    pub author: String,
    /// User ids, each at most once.
    pub liked_by: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds a recipe owned by `author`. The draft title must already be validated.
    pub fn new(author: String, title: String, draft: ContentDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            content: draft.content,
            ingredients: Json(draft.ingredients),
            image_url: draft.image_url,
            tags: Json(draft.tags),
            author,
            liked_by: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }
}

/// Payload pushed to connected clients when a recipe is created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewRecipeEvent {
    pub id: String,
    pub title: String,
    pub author: String,
}
