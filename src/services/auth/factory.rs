//! Factory: build `AuthPipeline` from application `Config`.
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::services::auth::{AuthPipeline, PgUserDirectory, TokenCodec};

pub fn build_auth_pipeline(config: &Config, db: PgPool) -> Arc<AuthPipeline> {
    let codec = TokenCodec::new(&config.token_secret, config.token_leeway_seconds);
    let directory = Arc::new(PgUserDirectory::new(db));

    Arc::new(AuthPipeline::new(codec, directory))
}
