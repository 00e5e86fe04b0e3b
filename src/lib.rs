//! Bookshelf - Book Catalog API
//!
//! A REST backend for a catalog of authors and books, with user accounts
//! that confirm their email before they can log in and receive a JWT for
//! write operations.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration, the response envelope, validation errors
//! - **`backend`** - Axum server, auth workflow, catalog, mail
//!
//! # Usage
//!
//! ```rust,no_run
//! use bookshelf::backend::server::init::create_app;
//! use bookshelf::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
