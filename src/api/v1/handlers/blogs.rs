/*
 * Responsibility
 * - /blogs 系 handler (list / create / update likes / delete)
 * - Path の {blog_id} は公開 ID → extractor で内部 ID に変換して受け取る
 * - create/delete pass the Authorization header to the auth pipeline explicitly;
 *   list and update-likes are open
 * - request bodies go through JsonBody so malformed input is a 400 AppError
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::blogs::{
            BlogOwner, BlogRefResponse, BlogResponse, CreateBlogRequest, UpdateLikesRequest,
        },
        extractors::{AuthHeader, JsonBody, PublicBlogId},
    },
    domain::BlogRecord,
    error::AppError,
    repos::{blog_repo, error::RepoError},
    services::auth::AuthPipeline,
    state::AppState,
};

fn record_to_ref_response(
    state: &AppState,
    record: BlogRecord,
) -> Result<BlogRefResponse, AppError> {
    Ok(BlogRefResponse {
        id: state.id_codec.encode(record.id)?,
        title: record.title,
        author: record.author,
        url: record.url,
        likes: record.likes,
        user: record.owner_user_id,
    })
}

fn row_to_record(row: blog_repo::BlogRow) -> Result<BlogRecord, RepoError> {
    Ok(BlogRecord::try_from(row)?)
}

pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let rows = blog_repo::list_with_owner(&state.db).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        let record = row_to_record(row.blog)?;
        res.push(BlogResponse {
            id: state.id_codec.encode(record.id)?,
            user: BlogOwner {
                id: record.owner_user_id,
                username: row.owner_username,
                name: row.owner_name,
            },
            title: record.title,
            author: record.author,
            url: record.url,
            likes: record.likes,
        });
    }

    Ok(Json(res))
}

pub async fn create_blog(
    State(state): State<AppState>,
    auth: AuthHeader,
    JsonBody(req): JsonBody<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogRefResponse>), AppError> {
    let user = state
        .auth
        .authorize(auth.as_deref(), None)
        .await
        .into_result()?;

    let new_blog = req.into_new_blog()?;
    let row = blog_repo::create(&state.db, &new_blog, user.id).await?;
    let record = row_to_record(row)?;

    tracing::info!(blog_id = record.id, user_id = %user.id, "blog created");

    let res = record_to_ref_response(&state, record)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn update_likes(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
    JsonBody(req): JsonBody<UpdateLikesRequest>,
) -> Result<Json<BlogRefResponse>, AppError> {
    let likes = req.likes()?;

    let row = blog_repo::update_likes(&state.db, blog_id.id, likes)
        .await?
        .ok_or(AppError::not_found("blog"))?;

    Ok(Json(record_to_ref_response(&state, row_to_record(row)?)?))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthHeader,
    blog_id: PublicBlogId,
) -> Result<StatusCode, AppError> {
    // credentials are checked before the blog is looked up
    let user = state
        .auth
        .authorize(auth.as_deref(), None)
        .await
        .into_result()?;

    let row = blog_repo::get(&state.db, blog_id.id)
        .await?
        .ok_or(AppError::not_found("blog"))?;
    let blog = row_to_record(row)?;

    let user = AuthPipeline::check_owner(user, &blog).into_result()?;

    if !blog_repo::delete(&state.db, blog.id).await? {
        return Err(AppError::not_found("blog"));
    }

    tracing::info!(blog_id = blog.id, user_id = %user.id, "blog deleted");
    Ok(StatusCode::NO_CONTENT)
}
