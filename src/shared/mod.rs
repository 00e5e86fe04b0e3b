//! Shared Module
//!
//! This module contains types that describe the public wire contract of the
//! API: the JSON response envelope every endpoint answers with, the
//! validation errors produced while parsing request bodies, and the
//! application configuration.
//!
//! # Overview
//!
//! Nothing in here touches the database or the HTTP stack, so clients and
//! tests can depend on these types without pulling in server state.

/// Shared error types
pub mod error;

/// JSON response envelope
pub mod response;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use response::{ApiResponse, ResponseCode};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, SmtpConfig};
