/**
 * Token Service
 *
 * Stateless, signed, time-bounded tokens:
 *
 * - **Verification tokens** prove control of a mailbox. The payload is the
 *   email plus its issuance time, signed with HMAC-SHA256 under a key derived
 *   from the server secret and a fixed salt:
 *
 *   ```text
 *   base64url({"email":"...","iat":1700000000}) "." base64url(hmac)
 *   ```
 *
 *   Both parts are unpadded base64url so the token can sit in a URL path.
 *
 * - **Access tokens** are JWTs, see [`crate::backend::auth::sessions`].
 *
 * Nothing is stored server-side, so a token cannot be revoked before it
 * expires.
 */

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::backend::auth::sessions::{unix_now, Claims, SessionKeys};
use crate::shared::AppConfig;

type HmacSha256 = Hmac<Sha256>;

/// Token decoding failures
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Altered, malformed, or signed with another secret/salt
    #[error("bad signature")]
    BadSignature,
    /// Well-formed and authentic, but older than the allowed age
    #[error("token expired")]
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct VerificationPayload {
    email: String,
    iat: u64,
}

/// Issues and checks verification and access tokens
#[derive(Clone)]
pub struct TokenService {
    signer: HmacSha256,
    sessions: SessionKeys,
}

impl TokenService {
    /// Build the service from the server secrets
    pub fn new(config: &AppConfig) -> Self {
        Self::from_secrets(
            &config.secret_key,
            &config.security_password_salt,
            &config.jwt_secret_key,
            config.jwt_expiry,
        )
    }

    /// Build the service from raw secrets
    pub fn from_secrets(secret_key: &str, salt: &str, jwt_secret: &str, jwt_expiry: Duration) -> Self {
        Self {
            signer: hmac_with_key(&derive_key(secret_key, salt)),
            sessions: SessionKeys::new(jwt_secret, jwt_expiry),
        }
    }

    /// Create a verification token for `email`, stamped with the current time
    pub fn generate_verification_token(&self, email: &str) -> String {
        self.generate_verification_token_at(email, unix_now())
    }

    pub(crate) fn generate_verification_token_at(&self, email: &str, issued_at: u64) -> String {
        let payload = VerificationPayload {
            email: email.to_string(),
            iat: issued_at,
        };
        // A struct of two plain fields always serializes.
        let payload_json = serde_json::to_vec(&payload).unwrap_or_default();
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload_json);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload_b64.as_bytes()));
        format!("{payload_b64}.{signature}")
    }

    /// Check a verification token and return the email it carries
    ///
    /// Integrity is checked before freshness, so an altered token always
    /// reports `BadSignature` even when it is also old.
    pub fn confirm_verification_token(&self, token: &str, max_age: Duration) -> Result<String, TokenError> {
        self.confirm_verification_token_at(token, max_age, unix_now())
    }

    pub(crate) fn confirm_verification_token_at(
        &self,
        token: &str,
        max_age: Duration,
        now: u64,
    ) -> Result<String, TokenError> {
        let (payload_b64, signature_b64) = token.trim().split_once('.').ok_or(TokenError::BadSignature)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::BadSignature)?;

        let mut mac = self.signer.clone();
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature).map_err(|_| TokenError::BadSignature)?;

        let payload_raw = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::BadSignature)?;
        let payload: VerificationPayload =
            serde_json::from_slice(&payload_raw).map_err(|_| TokenError::BadSignature)?;

        // Issued in the future counts as expired, as does anything past max_age.
        if payload.iat > now || now - payload.iat > max_age.as_secs() {
            return Err(TokenError::Expired);
        }

        Ok(payload.email)
    }

    /// Issue a JWT binding `identity`
    pub fn issue_access_token(&self, identity: &str, username: Option<&str>) -> Result<String, jsonwebtoken::errors::Error> {
        self.sessions.create_token(identity, username)
    }

    /// Validate a JWT and return its claims
    pub fn validate_access_token(&self, jwt: &str) -> Result<Claims, TokenError> {
        self.sessions.verify_token(jwt).map_err(|e| {
            tracing::debug!("Access token rejected: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::BadSignature,
            }
        })
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.signer.clone();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

fn hmac_with_key(key: &[u8]) -> HmacSha256 {
    <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts keys of any length")
}

fn derive_key(secret_key: &str, salt: &str) -> Vec<u8> {
    let mut mac = hmac_with_key(secret_key.as_bytes());
    mac.update(b"email-verification:");
    mac.update(salt.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
