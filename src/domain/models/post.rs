use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::content::ContentDraft;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub ingredients: Json<Vec<String>>,
    pub image_url: Option<String>,
    pub tags: Json<Vec<String>>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
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
            created_at: now,
            updated_at: now,
        }
    }
}
