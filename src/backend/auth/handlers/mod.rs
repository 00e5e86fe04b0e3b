//! Authentication Handlers Module
//!
//! HTTP handlers for the user endpoints. Each one parses the request,
//! validates it into a workflow input (see [`types`]) and calls the
//! [`AuthService`](crate::backend::auth::workflow::AuthService).
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request types and validation
//! ├── signup.rs   - POST /api/users
//! ├── login.rs    - POST /api/users/login
//! └── confirm.rs  - GET  /api/users/confirm/{token}
//! ```

/// Request types and validation
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Email confirmation handler
pub mod confirm;

pub use types::{LoginRequest, SignupRequest, UserResponse};

pub use confirm::confirm_email;
pub use login::login;
pub use signup::signup;
