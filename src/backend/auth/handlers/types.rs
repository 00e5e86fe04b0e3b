/**
 * Authentication Handler Types
 *
 * Request bodies for the user endpoints. Every body field is optional at
 * the serde level so a missing field becomes a `422 invalidInput` with a
 * useful message instead of an opaque deserialization failure. `validate`
 * turns a body into the workflow's input type.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;
use crate::backend::auth::workflow::{Credentials, LoginIdentity, Signup};
use crate::shared::error::{require_text, SharedError};

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SignupRequest {
    /// Chosen username (unique)
    pub username: Option<String>,
    /// Email address (unique, receives the confirmation link)
    pub email: Option<String>,
    /// Plaintext password, hashed before storage
    pub password: Option<String>,
}

impl SignupRequest {
    /// Check required fields and the email shape
    ///
    /// Fields are checked in the order username, email, password; the first
    /// problem found is reported.
    pub fn validate(self) -> Result<Signup, SharedError> {
        let username = require_text("username", self.username)?;
        let email = require_text("email", self.email)?;
        if !is_plausible_email(&email) {
            return Err(SharedError::validation("email", "is not a valid email address"));
        }
        let password = match self.password {
            Some(p) if !p.trim().is_empty() => p,
            _ => return Err(SharedError::missing("password")),
        };

        Ok(Signup {
            username,
            email,
            password,
        })
    }
}

/// Login request
///
/// `email` is the usual lookup key; `username` is accepted in its place.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Require a password and one of `email` / `username`
    pub fn validate(self) -> Result<Credentials, SharedError> {
        let identity = match (
            require_text("email", self.email).ok(),
            require_text("username", self.username).ok(),
        ) {
            (Some(email), _) => LoginIdentity::Email(email),
            (None, Some(username)) => LoginIdentity::Username(username),
            (None, None) => return Err(SharedError::missing("email")),
        };
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(SharedError::missing("password")),
        };

        Ok(Credentials { identity, password })
    }
}

/// Public view of a user, safe to return to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace),
        None => false,
    }
}
