//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - JWT guard for write routes
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use bookshelf::backend::middleware::auth_middleware;
//!
//! let protected = write_routes.route_layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
