//! Backend Module
//!
//! The Axum HTTP server for the Bookshelf catalog.
//!
//! # Architecture
//!
//! - **`server`** - Initialization, application state, database
//! - **`routes`** - Router assembly and the public/protected split
//! - **`auth`** - Signup, email confirmation, login, tokens
//! - **`catalog`** - Authors, books and avatar upload
//! - **`mail`** - Outgoing mail
//! - **`middleware`** - JWT guard for write routes
//! - **`error`** - `ApiError` and its HTTP mapping
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - Binary entry point
//! ├── server/
//! ├── routes/
//! ├── auth/
//! ├── catalog/
//! ├── mail/
//! ├── middleware/
//! └── error/
//! ```
//!
//! # State Management
//!
//! `AppState` is built once and cloned into every handler: the SQLite pool,
//! the credential store, the token service, the mailer and the config. None
//! of it changes after start-up, so nothing is locked.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Authors and books
pub mod catalog;

/// Outgoing mail
pub mod mail;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::ApiError;
pub use server::{create_app, AppState};
