//! User lookup capability consumed by the auth pipeline.
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::UserRecord;
use crate::repos::{error::RepoError, user_repo};

/// Directory backend failure.
///
/// Distinct from "not found": callers must treat it as an authentication
/// failure (fail-closed), never as a successful lookup.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Resolve a user id to a user record.
///
/// Returns:
/// - `Ok(Some(_))` => user exists
/// - `Ok(None)`    => no such user (deleted, never existed)
/// - `Err(_)`      => backend failure
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, DirectoryError>;
}

/// Postgres-backed directory (the `users` table).
#[derive(Clone, Debug)]
pub struct PgUserDirectory {
    db: PgPool,
}

impl PgUserDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, DirectoryError> {
        let row = user_repo::get(&self.db, id).await?;
        Ok(row.map(UserRecord::from))
    }
}
