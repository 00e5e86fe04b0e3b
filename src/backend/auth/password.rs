/**
 * Password Hashing
 *
 * bcrypt hashing and verification. Both are CPU bound (a cost of 12 takes a
 * few hundred milliseconds), so the async wrappers run them on the blocking
 * thread pool instead of stalling the request executor.
 */

use bcrypt::{hash, verify, BcryptError};
use tokio::task;

use crate::backend::error::ApiError;

/// Hash a password with the given bcrypt cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Check a password against a stored bcrypt hash
///
/// # Returns
/// * `Ok(true)` - password matches
/// * `Ok(false)` - password does not match
/// * `Err(_)` - the stored hash is malformed
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}

/// [`hash_password`] on the blocking pool
pub async fn hash_password_async(password: String, cost: u32) -> Result<String, ApiError> {
    task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::server(format!("password hashing task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// [`verify_password`] on the blocking pool
pub async fn verify_password_async(password: String, password_hash: String) -> Result<bool, ApiError> {
    task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| ApiError::server(format!("password verification task failed: {}", e)))?
        .map_err(ApiError::from)
}
