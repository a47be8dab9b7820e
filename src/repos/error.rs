/*
 * Responsibility
 * - what the repo layer reports upward (driver failure vs. a row that
 *   no longer satisfies record invariants, or a unique key clash)
 */
use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("corrupt row: {0}")]
    Corrupt(#[from] ValidationError),
    #[error("username already taken")]
    DuplicateUsername,
}
