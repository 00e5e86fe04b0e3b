/**
 * Auth Workflow
 *
 * Signup, email confirmation and login over the credential store, the token
 * service and the mailer. An account moves through two states:
 *
 * ```text
 * signup ──> unverified ──confirm──> verified ──login──> access token
 * ```
 *
 * # Failure policy
 *
 * Every failure is converted into an [`ApiError`] and answered locally.
 * Nothing is retried. The one exception is the confirmation mail: if it
 * cannot be sent the error is logged and the signup still succeeds, so the
 * user row is kept.
 */

use std::sync::Arc;
use std::time::Duration;

use crate::backend::auth::password::{hash_password_async, verify_password_async};
use crate::backend::auth::tokens::TokenService;
use crate::backend::auth::users::{NewUser, User, UserStore};
use crate::backend::error::ApiError;
use crate::backend::mail::{confirmation_email, Mailer};
use crate::shared::AppConfig;

/// Validated signup input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// How a login identifies the account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentity {
    Email(String),
    Username(String),
}

/// Validated login input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: LoginIdentity,
    pub password: String,
}

/// The auth workflow and its collaborators
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    mailer: Arc<dyn Mailer>,
    bcrypt_cost: u32,
    base_url: String,
    verification_max_age: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
        mailer: Arc<dyn Mailer>,
        config: &AppConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            bcrypt_cost: config.bcrypt_cost,
            base_url: config.base_url().to_string(),
            verification_max_age: config.verification_max_age,
        }
    }

    /// Register a new, unverified account and mail its confirmation link
    ///
    /// # Errors
    ///
    /// * `Conflict` - email or username already taken, including when a
    ///   concurrent signup wins the race to the unique constraint
    /// * `Server` - hashing or storage failed
    pub async fn signup(&self, input: Signup) -> Result<User, ApiError> {
        tracing::info!("Signup request for username: {}, email: {}", input.username, input.email);

        if self.users.find_by_email(&input.email).await?.is_some() {
            tracing::warn!("Email already exists: {}", input.email);
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            tracing::warn!("Username already exists: {}", input.username);
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }

        let password_hash = hash_password_async(input.password, self.bcrypt_cost).await?;

        let user = self
            .users
            .insert(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                verified: false,
            })
            .await?;

        let token = self.tokens.generate_verification_token(&user.email);
        let (subject, body) = confirmation_email(&user.username, &self.confirm_url(&token));
        if let Err(e) = self.mailer.send(&user.email, &subject, &body).await {
            tracing::error!("Failed to send confirmation email to {}: {}", user.email, e);
        }

        tracing::info!("User created successfully: {} ({})", user.username, user.email);
        Ok(user)
    }

    /// Mark the account behind a verification token as verified
    ///
    /// Not idempotent: a second confirmation of the same account fails with
    /// `AlreadyVerified`, including when both arrive at once.
    pub async fn confirm(&self, token: &str) -> Result<User, ApiError> {
        let email = self
            .tokens
            .confirm_verification_token(token, self.verification_max_age)
            .map_err(|e| {
                tracing::warn!("Rejected verification token: {}", e);
                ApiError::InvalidToken(e)
            })?;

        let user = self.users.mark_verified(&email).await?;
        tracing::info!("User verified: {}", user.email);
        Ok(user)
    }

    /// Check credentials and issue an access token bound to the email
    ///
    /// Unknown accounts and wrong passwords produce the same `Unauthorized`.
    /// The password is checked before the verified flag, so `NotVerified`
    /// is only ever returned to someone who knows the password.
    pub async fn login(&self, credentials: Credentials) -> Result<(String, User), ApiError> {
        let user = match &credentials.identity {
            LoginIdentity::Email(email) => self.users.find_by_email(email).await?,
            LoginIdentity::Username(username) => self.users.find_by_username(username).await?,
        };

        let Some(user) = user else {
            tracing::warn!("Login for unknown account: {:?}", credentials.identity);
            return Err(ApiError::Unauthorized);
        };

        if !verify_password_async(credentials.password, user.password_hash.clone()).await? {
            tracing::warn!("Invalid password for user: {}", user.email);
            return Err(ApiError::Unauthorized);
        }

        if !user.verified {
            tracing::info!("Login refused, account not verified: {}", user.email);
            return Err(ApiError::NotVerified);
        }

        let token = self.tokens.issue_access_token(&user.email, Some(&user.username))?;
        tracing::info!("User logged in successfully: {} ({})", user.username, user.email);
        Ok((token, user))
    }

    /// Absolute confirmation link for a verification token
    pub fn confirm_url(&self, token: &str) -> String {
        format!("{}/api/users/confirm/{}", self.base_url, token)
    }
}
