/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT access token generation and validation. Access
 * tokens bind a user's email and gate every write endpoint.
 */

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identity (user email)
    pub sub: String,
    /// Username, informational only
    #[serde(default)]
    pub username: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Signing material for access tokens
///
/// Built once from the configuration; the keys never change for the life of
/// the process.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl SessionKeys {
    /// Create keys from the JWT secret and token lifetime
    pub fn new(secret: &str, expiry: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        }
    }

    /// Create a JWT token for a user
    ///
    /// # Arguments
    /// * `email` - Identity bound into `sub`
    /// * `username` - Optional display name
    ///
    /// # Returns
    /// JWT token string
    pub fn create_token(&self, email: &str, username: Option<&str>) -> Result<String, jsonwebtoken::errors::Error> {
        self.create_token_at(email, username, unix_now())
    }

    pub(crate) fn create_token_at(
        &self,
        email: &str,
        username: Option<&str>,
        now: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: email.to_string(),
            username: username.map(str::to_string),
            exp: now.saturating_add(self.expiry.as_secs()),
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify and decode a JWT token
    ///
    /// Fails on a bad signature, a malformed token, or an expired `exp`.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let token_data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(token_data.claims)
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
