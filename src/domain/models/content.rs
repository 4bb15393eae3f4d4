//! Input shapes shared by recipes and posts.

use crate::error::AppError;

/// Fields supplied when creating a recipe or post.
#[derive(Debug, Clone, Default)]
pub struct ContentDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
}

impl ContentDraft {
    /// Returns the title, rejecting a missing or blank one.
    pub fn require_title(&self) -> Result<String, AppError> {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => Ok(title.to_string()),
            _ => Err(AppError::Validation("title is required".into())),
        }
    }
}

/// Partial update. An outer `None` leaves the stored field untouched; for the
/// nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub ingredients: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<Option<String>>,
}

impl ContentPatch {
    /// Trims a supplied title the same way creation does and rejects a blank one.
    pub fn normalized(mut self) -> Result<Self, AppError> {
        if let Some(title) = self.title.take() {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return Err(AppError::Validation("title must not be empty".into()));
            }
            self.title = Some(trimmed.to_string());
        }
        Ok(self)
    }
}
