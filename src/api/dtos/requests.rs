use crate::domain::models::content::{ContentDraft, ContentPatch};
use crate::error::AppError;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /recipes` and `POST /posts`. The description travels as `contents`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentRequest {
    pub title: Option<String>,
    pub contents: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
}

impl From<CreateContentRequest> for ContentDraft {
    fn from(req: CreateContentRequest) -> Self {
        ContentDraft {
            title: req.title,
            content: req.contents,
            ingredients: req.ingredients.unwrap_or_default(),
            tags: req.tags.unwrap_or_default(),
            image_url: req.image_url,
        }
    }
}

/// Body of `PATCH`. Absent fields stay as stored, an explicit `null` clears a
/// nullable field. `author` is not accepted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub contents: Option<Option<String>>,
    pub ingredients: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

/// Wraps whatever was sent, `null` included, so a missing key (left to
/// `default`) can be told apart from an explicit `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TryFrom<UpdateContentRequest> for ContentPatch {
    type Error = AppError;

    fn try_from(req: UpdateContentRequest) -> Result<Self, Self::Error> {
        let title = match req.title {
            Some(None) => return Err(AppError::Validation("title must not be null".into())),
            Some(Some(title)) => Some(title),
            None => None,
        };
        Ok(ContentPatch {
            title,
            content: req.contents,
            ingredients: req.ingredients,
            tags: req.tags,
            image_url: req.image_url,
        })
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub author: Option<String>,
    /// Comma separated.
    pub tags: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListQuery {
    pub fn tag_list(&self) -> Option<Vec<String>> {
        let raw = self.tags.as_deref()?;
        let tags: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        (!tags.is_empty()).then_some(tags)
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Deserialize)]
pub struct PopularQuery {
    pub limit: Option<i64>,
}
