/**
 * Authentication Middleware
 *
 * This module protects the catalog write routes. It extracts and verifies
 * the JWT from the `Authorization: Bearer <token>` header and attaches the
 * authenticated identity to the request for handlers to read.
 *
 * Every failure (no header, wrong scheme, bad signature, expired token)
 * is answered with the same `401 notAuthorized` envelope.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::Claims;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
    pub username: Option<String>,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            username: claims.username,
        }
    }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies signature and expiry
/// 3. Attaches the `AuthenticatedUser` to request extensions
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;

    let claims = app_state.tokens.validate_access_token(token).map_err(|e| {
        tracing::warn!("Invalid access token: {}", e);
        ApiError::Unauthorized
    })?;

    request.extensions_mut().insert(AuthenticatedUser::from(claims));

    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::Unauthorized
        })?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            ApiError::Unauthorized
        })
}

/// Axum extractor for authenticated user
///
/// Reads what [`auth_middleware`] stored; on a route without the middleware
/// it rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::Unauthorized
            })?;

        Ok(AuthUser(user))
    }
}
