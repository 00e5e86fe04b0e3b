//! Server Module
//!
//! Initialization and shared state for the Axum HTTP server.
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database connection and migrations
//! └── init.rs         - Server initialization and app creation
//! ```

/// Application state management
pub mod state;

/// Database connection
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, InitError};
pub use state::AppState;
