/**
 * Book Handlers
 *
 * CRUD for `/api/books`. A book always belongs to an existing author.
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
use crate::backend::catalog::models::{BookFields, CreateBookRequest, PatchBookRequest};
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::shared::error::require_text;
use crate::shared::ApiResponse;

/// POST /api/books
///
/// An `author_id` that names no author is invalid input (422), not 404.
pub async fn create_book(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let Json(request) = payload?;
    let (book, author_id) = request.validate()?;

    if db::get_author(&pool, author_id).await?.is_none() {
        return Err(ApiError::validation(format!("author_id {} does not exist", author_id)));
    }

    let book = db::create_book(&pool, &book, author_id).await?;
    tracing::info!("Book {} created by {}", book.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Book created").with("book", book)),
    ))
}

/// GET /api/books
pub async fn list_books(State(pool): State<SqlitePool>) -> Result<Json<ApiResponse>, ApiError> {
    let books = db::list_books(&pool).await?;
    Ok(Json(ApiResponse::success("Books").with("books", books)))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Path(id) = id?;
    let book = db::get_book(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Book"))?;
    Ok(Json(ApiResponse::success("Book").with("book", book)))
}

/// PUT /api/books/{id} - replace `title` and `year`, both required
pub async fn replace_book(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookFields>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Path(id) = id?;
    let Json(fields) = payload?;
    let fields = fields.validate()?;

    let book = db::update_book(&pool, id, Some(fields.title), Some(fields.year))
        .await?
        .ok_or_else(|| ApiError::not_found("Book"))?;
    tracing::info!("Book {} replaced by {}", id, user.email);

    Ok(Json(ApiResponse::success("Book updated").with("book", book)))
}

/// PATCH /api/books/{id} - change whichever of `title` / `year` is sent
pub async fn patch_book(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PatchBookRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let title = require_text("title", request.title).ok();

    let book = db::update_book(&pool, id, title, request.year)
        .await?
        .ok_or_else(|| ApiError::not_found("Book"))?;
    tracing::info!("Book {} updated by {}", id, user.email);

    Ok(Json(ApiResponse::success("Book updated").with("book", book)))
}

/// DELETE /api/books/{id}
pub async fn delete_book(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !db::delete_book(&pool, id).await? {
        return Err(ApiError::not_found("Book"));
    }
    tracing::info!("Book {} deleted by {}", id, user.email);
    Ok(StatusCode::NO_CONTENT)
}
