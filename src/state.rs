/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提 (PgPool / Arc inside, cheap to clone)
 */
use std::sync::Arc;

use crate::services::{auth::AuthPipeline, id_codec::IdCodec, password::PasswordHasher};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthPipeline>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl AppState {
    pub fn new(
        db: sqlx::PgPool,
        id_codec: IdCodec,
        auth: Arc<AuthPipeline>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            db,
            id_codec,
            auth,
            hasher,
        }
    }
}
