/*
 * Responsibility
 * - GET /users: users with the blogs they own
 * - POST /users: registration (validate -> hash off the executor -> insert)
 * - users は UUID をそのまま扱う (復号化なし); blog ids are encoded
 */
use std::collections::HashMap;

use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::users::{CreateUserRequest, UserBlog, UserResponse},
        extractors::JsonBody,
    },
    error::AppError,
    repos::{blog_repo, user_repo},
    state::AppState,
};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user_repo::list(&state.db).await?;
    let blogs = blog_repo::list_records(&state.db).await?;

    let mut by_owner: HashMap<Uuid, Vec<UserBlog>> = HashMap::new();
    for blog in blogs {
        by_owner
            .entry(blog.owner_user_id)
            .or_default()
            .push(UserBlog {
                id: state.id_codec.encode(blog.id)?,
                title: blog.title,
                author: blog.author,
                url: blog.url,
            });
    }

    let res = users
        .into_iter()
        .map(|u| UserResponse {
            blogs: by_owner.remove(&u.id).unwrap_or_default(),
            id: u.id,
            username: u.username,
            name: u.name,
        })
        .collect();

    Ok(Json(res))
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let new_user = req.into_new_user()?;

    let hasher = state.hasher.clone();
    let password = new_user.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing task failed");
            AppError::Internal
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::Internal
        })?;

    let row = user_repo::create(&state.db, &new_user, &password_hash).await?;

    tracing::info!(user_id = %row.id, username = %row.username, "user registered");

    let res = UserResponse {
        id: row.id,
        username: row.username,
        name: row.name,
        blogs: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(res)))
}
