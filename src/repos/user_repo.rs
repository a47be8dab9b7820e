/*
 * Responsibility
 * - SQLx reads against the users table
 * - create(): registration insert, unique username clash -> DuplicateUsername
 * - UserRow -> UserRecord conversion for the user directory
 */
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{NewUser, UserRecord};
use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            name: row.name,
        }
    }
}

pub async fn list(db: &PgPool) -> Result<Vec<UserRow>, RepoError> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", username, name, "passwordHash"
        FROM users
        ORDER BY "createdAt" ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", username, name, "passwordHash"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    user: &NewUser,
    password_hash: &str,
) -> Result<UserRow, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, name, "passwordHash")
        VALUES ($1, $2, $3)
        RETURNING "userId", username, name, "passwordHash"
        "#,
    )
    .bind(&user.username)
    .bind(user.name.as_deref())
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            RepoError::DuplicateUsername
        }
        e => RepoError::Db(e),
    })?;

    Ok(row)
}
