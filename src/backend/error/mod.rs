//! Backend Error Module
//!
//! This module defines the error type returned by every handler and its
//! conversion into HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - `ApiError` and its status/code mapping
//! - **`conversion`** - `IntoResponse` and extractor rejection conversions
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! Handlers return `Result<_, ApiError>` and use `?` on store, token and
//! hashing results; nothing escapes the route boundary unconverted.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
