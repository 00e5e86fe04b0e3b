/**
 * Backend Error Types
 *
 * This module defines the error taxonomy shared by every handler. Each
 * variant maps to exactly one HTTP status and one machine-readable
 * response code.
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * - `Validation` - missing or malformed input (422)
 * - `Unauthorized` - bad credentials or bad access token (401)
 * - `NotVerified` - correct credentials, unconfirmed account (400)
 * - `InvalidToken` - tampered or expired confirmation token (422)
 * - `AlreadyVerified` - confirmation of an already confirmed account (422)
 * - `NotFound` - unknown resource or token subject (404)
 * - `Conflict` - duplicate email or username (409)
 *
 * ## Server errors
 *
 * - `Server` - anything unexpected (500). The detail is logged, never sent.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::tokens::TokenError;
use crate::backend::auth::users::StoreError;
use crate::shared::{ResponseCode, SharedError};

/// Backend error taxonomy
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid credentials or access token
    #[error("Unauthorized")]
    Unauthorized,

    /// Credentials are correct but the email is not confirmed yet
    #[error("Account not verified")]
    NotVerified,

    /// Confirmation token was tampered with, signed elsewhere, or expired
    #[error("Invalid token: {0}")]
    InvalidToken(#[source] TokenError),

    /// The account behind a confirmation token is already verified
    #[error("Account already verified")]
    AlreadyVerified,

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique field is already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unexpected internal failure
    #[error("Server error: {0}")]
    Server(String),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create an internal error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotVerified => StatusCode::BAD_REQUEST,
            Self::InvalidToken(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AlreadyVerified => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the machine-readable response code
    pub fn code(&self) -> ResponseCode {
        match self {
            Self::Validation(_) => ResponseCode::InvalidInput,
            Self::Unauthorized => ResponseCode::NotAuthorized,
            Self::NotVerified => ResponseCode::NotVerified,
            Self::InvalidToken(_) => ResponseCode::InvalidToken,
            Self::AlreadyVerified => ResponseCode::AlreadyVerified,
            Self::NotFound(_) => ResponseCode::NotFound,
            Self::Conflict(_) => ResponseCode::Conflict,
            Self::Server(_) => ResponseCode::ServerError,
        }
    }

    /// Get the message sent to the client
    ///
    /// Internal details of `Server` errors are not exposed.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(message) => format!("Invalid input: {}", message),
            Self::Unauthorized => "Invalid authentication.".to_string(),
            Self::NotVerified => "Account is not verified. Check your inbox for the confirmation link.".to_string(),
            Self::InvalidToken(_) => "The confirmation link is invalid or has expired.".to_string(),
            Self::AlreadyVerified => "Account already verified. Please login.".to_string(),
            Self::NotFound(what) => format!("{} not found", what),
            Self::Conflict(message) => message.clone(),
            Self::Server(_) => "Server error".to_string(),
        }
    }
}

impl From<SharedError> for ApiError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation(format!("{} {}", field, message)),
            SharedError::SerializationError { message } => Self::Validation(message),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => Self::Conflict(message),
            StoreError::NotFound => Self::not_found("User"),
            StoreError::AlreadyVerified => Self::AlreadyVerified,
            StoreError::Database(e) => Self::Server(format!("database: {}", e)),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Resource"),
            other => Self::Server(format!("database: {}", other)),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Server(format!("password hashing: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Server(format!("jwt: {}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Server(format!("io: {}", err))
    }
}
