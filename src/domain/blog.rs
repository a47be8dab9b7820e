/*
 * Responsibility
 * - BlogRecord: a validated blog entry (likes is already non-negative)
 * - NewBlog: the validated input of a create
 * - parse_likes(): absent -> 0, negative -> InvalidLikesValue
 */
use uuid::Uuid;

use super::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogRecord {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
    pub owner_user_id: Uuid,
}

/// Input of a blog creation, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
}

impl NewBlog {
    /// Both `title` and `url` must be present and non-blank.
    /// A missing `likes` defaults to 0.
    pub fn parse(
        title: Option<&str>,
        author: Option<&str>,
        url: Option<&str>,
        likes: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let title = required("title", title)?;
        let url = required("url", url)?;
        let likes = parse_likes(likes)?;

        let author = author
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            title,
            author,
            url,
            likes,
        })
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingRequiredField(field)),
    }
}

pub fn parse_likes(likes: Option<i64>) -> Result<u64, ValidationError> {
    match likes {
        None => Ok(0),
        Some(n) => {
            u64::try_from(n).map_err(|_| ValidationError::InvalidLikesValue(n.to_string()))
        }
    }
}
