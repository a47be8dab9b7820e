/*
 * Responsibility
 * - Blogs の request/response DTO
 * - request bodies are parsed loosely (every field optional) and turned into
 *   validated domain values by into_new_blog() / likes()
 * - 公開 ID を返す (内部 blogId を漏らさない)
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{NewBlog, ValidationError, parse_likes};

#[derive(Debug, Default, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<Value>,
}

impl CreateBlogRequest {
    pub fn into_new_blog(self) -> Result<NewBlog, ValidationError> {
        let likes = self.likes.as_ref().map(likes_integer).transpose()?;

        NewBlog::parse(
            self.title.as_deref(),
            self.author.as_deref(),
            self.url.as_deref(),
            likes,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateLikesRequest {
    pub likes: Option<Value>,
}

impl UpdateLikesRequest {
    pub fn likes(&self) -> Result<u64, ValidationError> {
        let likes = self
            .likes
            .as_ref()
            .ok_or(ValidationError::MissingRequiredField("likes"))?;
        parse_likes(Some(likes_integer(likes)?))
    }
}

// `likes` arrives as raw JSON: strings, fractions and out-of-range numbers
// must become InvalidLikesValue rather than a body rejection.
fn likes_integer(value: &Value) -> Result<i64, ValidationError> {
    value
        .as_i64()
        .ok_or_else(|| ValidationError::InvalidLikesValue(value.to_string()))
}

#[derive(Debug, Serialize)]
pub struct BlogOwner {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: String, // encoded
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
    pub user: BlogOwner,
}

/// Blog response where the owner is only referenced by id (create/update).
#[derive(Debug, Serialize)]
pub struct BlogRefResponse {
    pub id: String, // encoded
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
    pub user: Uuid,
}
