/*
 * Responsibility
 * - GET /blogs/stats: aggregate statistics over every stored blog
 */
use axum::{Json, extract::State};

use crate::{
    error::AppError,
    repos::blog_repo,
    services::stats::{self, StatsSummary},
    state::AppState,
};

pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<StatsSummary>, AppError> {
    let blogs = blog_repo::list_records(&state.db).await?;

    Ok(Json(stats::summarize(&blogs)))
}
