/**
 * Author Handlers
 *
 * CRUD for `/api/authors`. Reads are public; creating, changing and
 * deleting authors run behind the JWT guard and log the acting user.
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::catalog::db;
use crate::backend::catalog::models::{CreateAuthorRequest, UpdateAuthorRequest};
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::shared::ApiResponse;

/// POST /api/authors
///
/// Body: `{first_name, last_name, books?: [{title, year}]}`. Responds 201
/// with the created author (and books) under `author`.
pub async fn create_author(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let Json(request) = payload?;
    let new_author = request.validate()?;

    let author = db::create_author(&pool, new_author).await?;
    tracing::info!("Author {} created by {}", author.author.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Author created").with("author", author)),
    ))
}

/// GET /api/authors
pub async fn list_authors(State(pool): State<SqlitePool>) -> Result<Json<ApiResponse>, ApiError> {
    let authors = db::list_authors(&pool).await?;
    Ok(Json(ApiResponse::success("Authors").with("authors", authors)))
}

/// GET /api/authors/{id}
pub async fn get_author(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Path(id) = id?;
    let author = db::get_author_detail(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Author"))?;
    Ok(Json(ApiResponse::success("Author").with("author", author)))
}

/// PATCH /api/authors/{id}
///
/// Only non-blank `first_name` / `last_name` values are applied.
pub async fn update_author(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateAuthorRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let (first_name, last_name) = request.normalized();

    let author = db::update_author(&pool, id, first_name, last_name)
        .await?
        .ok_or_else(|| ApiError::not_found("Author"))?;
    tracing::info!("Author {} updated by {}", id, user.email);

    Ok(Json(ApiResponse::success("Author updated").with("author", author)))
}

/// DELETE /api/authors/{id}
pub async fn delete_author(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !db::delete_author(&pool, id).await? {
        return Err(ApiError::not_found("Author"));
    }
    tracing::info!("Author {} deleted by {}", id, user.email);
    Ok(StatusCode::NO_CONTENT)
}
