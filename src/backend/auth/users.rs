/**
 * User Model and Credential Store
 *
 * This module defines the user record and the `UserStore` repository the
 * auth workflow talks to. `SqlUserStore` is the SQLite implementation.
 *
 * Uniqueness of `email` and `username` is enforced by the schema; a
 * violation on insert surfaces as `StoreError::Conflict`, which is what
 * resolves two concurrent signups for the same address.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Row id
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// User email address (unique, primary lookup key)
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the email address has been confirmed
    pub verified: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verified: bool,
}

/// Credential store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique column already holds this value
    #[error("{0}")]
    Conflict(String),
    /// No user matched the lookup
    #[error("user not found")]
    NotFound,
    /// The user was already verified when the update ran
    #[error("user already verified")]
    AlreadyVerified,
    /// Any other database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence interface for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look a user up by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look a user up by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user, failing with `Conflict` on a duplicate email or username
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Flip `verified` from false to true for the user with this email
    ///
    /// The check and the write are one statement, so of two concurrent calls
    /// exactly one succeeds; the other gets `AlreadyVerified`.
    async fn mark_verified(&self, email: &str) -> Result<User, StoreError>;
}

/// SQLite-backed `UserStore`
#[derive(Debug, Clone)]
pub struct SqlUserStore {
    pool: SqlitePool,
}

impl SqlUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, verified, created_at";

#[async_trait]
impl UserStore for SqlUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();

        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash, verified, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.verified)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                let message = if db.message().contains("users.email") {
                    "Email already registered"
                } else if db.message().contains("users.username") {
                    "Username already taken"
                } else {
                    "User already exists"
                };
                StoreError::Conflict(message.to_string())
            }
            _ => StoreError::Database(e),
        })
    }

    async fn mark_verified(&self, email: &str) -> Result<User, StoreError> {
        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET verified = 1 WHERE email = ? AND verified = 0 RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user) = updated {
            return Ok(user);
        }
        match self.find_by_email(email).await? {
            Some(_) => Err(StoreError::AlreadyVerified),
            None => Err(StoreError::NotFound),
        }
    }
}
