/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses, and turns axum's
 * extractor rejections into the same error taxonomy so malformed requests
 * never bypass the JSON envelope.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "message": "Invalid input: username is required",
 *   "code": "invalidInput"
 * }
 * ```
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::multipart::{MultipartError, MultipartRejection},
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::ApiError;
use crate::shared::ApiResponse;

impl IntoResponse for ApiError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server errors are logged here with their full detail; the client only
    /// sees the generic message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = ApiResponse::new(self.code(), self.message());
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Validation(err.body_text())
    }
}
