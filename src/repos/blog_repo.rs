/*
 * Responsibility
 * - blogs CRUD
 * - assumes the userId FK cascades: deleting a user removes their blogs
 * - BlogRow -> BlogRecord (likes is re-validated on the way out)
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{BlogRecord, NewBlog, ValidationError, parse_likes};
use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    #[sqlx(rename = "blogId")]
    pub blog_id: i64,

    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,

    #[sqlx(rename = "userId")]
    pub user_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BlogRow> for BlogRecord {
    type Error = ValidationError;

    fn try_from(row: BlogRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.blog_id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: parse_likes(Some(row.likes))?,
            owner_user_id: row.user_id,
        })
    }
}

/// A blog joined with its owner's public fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogWithOwnerRow {
    #[sqlx(flatten)]
    pub blog: BlogRow,

    #[sqlx(rename = "ownerUsername")]
    pub owner_username: String,
    #[sqlx(rename = "ownerName")]
    pub owner_name: Option<String>,
}

fn likes_param(likes: u64) -> i64 {
    // parse_likes only yields values that came from an i64
    i64::try_from(likes).unwrap_or(i64::MAX)
}

pub async fn list_with_owner(db: &PgPool) -> Result<Vec<BlogWithOwnerRow>, RepoError> {
    let rows = sqlx::query_as::<_, BlogWithOwnerRow>(
        r#"
        SELECT
            b."blogId", b.title, b.author, b.url, b.likes, b."userId", b."createdAt",
            u.username AS "ownerUsername", u.name AS "ownerName"
        FROM blogs b
        JOIN users u ON u."userId" = b."userId"
        ORDER BY b."blogId" ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Snapshot of every blog as validated records (stats input).
pub async fn list_records(db: &PgPool) -> Result<Vec<BlogRecord>, RepoError> {
    let rows = sqlx::query_as::<_, BlogRow>(
        r#"
        SELECT "blogId", title, author, url, likes, "userId", "createdAt"
        FROM blogs
        ORDER BY "blogId" ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    let records = rows
        .into_iter()
        .map(BlogRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

pub async fn create(db: &PgPool, blog: &NewBlog, owner: Uuid) -> Result<BlogRow, RepoError> {
    let row = sqlx::query_as::<_, BlogRow>(
        r#"
        INSERT INTO blogs (title, author, url, likes, "userId")
        VALUES ($1, $2, $3, $4, $5)
        RETURNING "blogId", title, author, url, likes, "userId", "createdAt"
        "#,
    )
    .bind(&blog.title)
    .bind(blog.author.as_deref())
    .bind(&blog.url)
    .bind(likes_param(blog.likes))
    .bind(owner)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, blog_id: i64) -> Result<Option<BlogRow>, RepoError> {
    let row = sqlx::query_as::<_, BlogRow>(
        r#"
        SELECT "blogId", title, author, url, likes, "userId", "createdAt"
        FROM blogs
        WHERE "blogId" = $1
        "#,
    )
    .bind(blog_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update_likes(
    db: &PgPool,
    blog_id: i64,
    likes: u64,
) -> Result<Option<BlogRow>, RepoError> {
    let row = sqlx::query_as::<_, BlogRow>(
        r#"
        UPDATE blogs
        SET likes = $2
        WHERE "blogId" = $1
        RETURNING "blogId", title, author, url, likes, "userId", "createdAt"
        "#,
    )
    .bind(blog_id)
    .bind(likes_param(likes))
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, blog_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM blogs
        WHERE "blogId" = $1
        "#,
    )
    .bind(blog_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
