/**
 * Confirm Handler
 *
 * GET /api/users/confirm/{token} - the link mailed at signup.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::auth::workflow::AuthService;
use crate::backend::error::ApiError;
use crate::shared::ApiResponse;

/// Confirm email handler
///
/// # Errors
///
/// * `422 invalidToken` - tampered, foreign or expired token
/// * `404 notFound` - the token names an email with no account
/// * `422 alreadyVerified` - the account was confirmed before
pub async fn confirm_email(
    State(auth): State<AuthService>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let user = auth.confirm(&token).await?;
    Ok(Json(ApiResponse::success(format!("E-mail verified for {}, you can proceed to login now.", user.email))))
}
