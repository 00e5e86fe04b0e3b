/**
 * Avatar Upload
 *
 * POST /api/authors/avatar/{id} takes a multipart form with an `avatar`
 * file part. The file is written to the upload folder under a fresh,
 * sanitized name and the author's `avatar` becomes its public URL, served
 * back by `GET /avatar/{filename}`.
 */

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::PathRejection,
        Multipart, Path, State,
    },
    response::Json,
};
use uuid::Uuid;

use crate::backend::catalog::db;
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Content types accepted for avatars
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "jpeg"];

const AVATAR_FIELD: &str = "avatar";

/// Upsert an author's avatar
///
/// # Errors
///
/// * `422` - no `avatar` part, disallowed content type, or not multipart
/// * `404` - unknown author
pub async fn upload_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Path(id) = id?;
    let mut multipart = multipart?;

    if db::get_author(&state.pool, id).await?.is_none() {
        return Err(ApiError::not_found("Author"));
    }

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_allowed_content_type(&content_type) {
            return Err(ApiError::validation(format!("unsupported avatar type '{}'", content_type)));
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        upload = Some((original_name, data));
        break;
    }

    let (original_name, data) = upload.ok_or_else(|| ApiError::validation("avatar is required"))?;
    if data.is_empty() {
        return Err(ApiError::validation("avatar is empty"));
    }

    let filename = stored_file_name(&original_name);
    tokio::fs::create_dir_all(&state.config.upload_folder).await?;
    tokio::fs::write(state.config.upload_folder.join(&filename), &data).await?;

    let avatar_url = format!("{}/avatar/{}", state.config.base_url(), filename);
    let author = db::set_author_avatar(&state.pool, id, &avatar_url)
        .await?
        .ok_or_else(|| ApiError::not_found("Author"))?;
    tracing::info!("Avatar for author {} uploaded by {} ({} bytes)", id, user.email, data.len());

    Ok(Json(ApiResponse::success("Avatar uploaded").with("author", author)))
}

/// Whether a part's content type is an accepted image type
pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.contains(&content_type)
}

/// Reduce a client-supplied file name to a safe single path component
///
/// Keeps ASCII letters, digits, `.`, `-` and `_`; turns spaces into `_`;
/// drops everything else, including path separators and leading dots.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            ' ' => Some('_'),
            _ => None,
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

fn stored_file_name(original: &str) -> String {
    let safe = secure_filename(original);
    let safe = if safe.is_empty() { "avatar".to_string() } else { safe };
    format!("{}_{}", Uuid::new_v4().simple(), safe)
}
