/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /blogs, /blogs/stats, /users
 * - auth is not a route layer here: create/delete call the pipeline themselves
 */
use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    blogs::{create_blog, delete_blog, list_blogs, update_likes},
    health::health,
    stats::blog_stats,
    users::{create_user, list_users},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/stats", get(blog_stats))
        .route("/blogs/{blog_id}", put(update_likes).delete(delete_blog))
        .route("/users", get(list_users).post(create_user))
}
