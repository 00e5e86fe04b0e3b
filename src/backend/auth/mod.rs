//! Authentication Module
//!
//! User registration, email confirmation and login.
//!
//! # Architecture
//!
//! - **`users`** - User model and the `UserStore` repository
//! - **`password`** - bcrypt hashing
//! - **`sessions`** - JWT access tokens
//! - **`tokens`** - Signed email verification tokens, plus the access token facade
//! - **`workflow`** - `AuthService`: signup / confirm / login
//! - **`handlers`** - HTTP handlers for the user endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: account stored unverified, confirmation link mailed
//! 2. **Confirm**: the link's token is checked and the account marked verified
//! 3. **Login**: verified account + correct password → JWT access token
//! 4. **Writes**: catalog write routes require `Authorization: Bearer <jwt>`

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// Email verification tokens
pub mod tokens;

/// Signup, confirmation and login
pub mod workflow;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{confirm_email, login, signup};
pub use tokens::{TokenError, TokenService};
pub use users::{SqlUserStore, User, UserStore};
pub use workflow::{AuthService, Credentials, LoginIdentity, Signup};
