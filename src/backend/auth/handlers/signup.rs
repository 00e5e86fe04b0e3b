/**
 * Signup Handler
 *
 * POST /api/users - register an account.
 *
 * # Registration Process
 *
 * 1. Parse and validate `username`, `email` and `password`
 * 2. Hand the input to the auth workflow (hash, store, mail the link)
 * 3. Return the public view of the new user
 *
 * The password hash is never part of the response.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::SignupRequest;
use crate::backend::auth::workflow::AuthService;
use crate::backend::error::ApiError;
use crate::shared::ApiResponse;

/// Sign up handler
///
/// # Errors
///
/// * `422 Unprocessable Entity` - missing/blank field or malformed body
/// * `409 Conflict` - email or username already registered
/// * `500 Internal Server Error` - hashing or storage failure
///
/// # Example Request
///
/// ```http
/// POST /api/users HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "nicoCaos", "email": "andresortizchemist@gmail.com", "password": "1234567891011"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"username": "nicoCaos", "email": "andresortizchemist@gmail.com", "message": "User created", "code": "success"}
/// ```
pub async fn signup(
    State(auth): State<AuthService>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let Json(request) = payload?;
    let input = request.validate()?;

    let user = auth.signup(input).await?;

    let body = ApiResponse::success("User created. Check your inbox to confirm your email.")
        .with("username", &user.username)
        .with("email", &user.email);
    Ok((StatusCode::CREATED, Json(body)))
}
