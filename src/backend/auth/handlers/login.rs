/**
 * Login Handler
 *
 * POST /api/users/login - exchange credentials for an access token.
 *
 * # Security
 *
 * - Unknown accounts and wrong passwords get the same 401
 * - Unverified accounts get 400, but only after the password matched
 * - The token is returned at the top level of the body as `access_token`
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{LoginRequest, UserResponse};
use crate::backend::auth::workflow::AuthService;
use crate::backend::error::ApiError;
use crate::shared::ApiResponse;

/// Login handler
///
/// # Errors
///
/// * `422 Unprocessable Entity` - missing password or identity
/// * `401 Unauthorized` - unknown account or wrong password
/// * `400 Bad Request` - correct password, email not confirmed
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": {"username": "DArchemist3", "email": "darleyortiz@hotmail.com"},
///   "message": "Logged in as darleyortiz@hotmail.com",
///   "code": "success"
/// }
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(request) = payload?;
    let credentials = request.validate()?;

    let (access_token, user) = auth.login(credentials).await?;

    Ok(Json(
        ApiResponse::success(format!("Logged in as {}", user.email))
            .with("access_token", access_token)
            .with("user", UserResponse::from(&user)),
    ))
}
