//! Catalog Module
//!
//! Authors and the books they wrote. This is plain CRUD over SQLite; its
//! write endpoints are what the JWT guard protects.
//!
//! - **`models`** - Row types and request bodies
//! - **`db`** - Queries
//! - **`handlers`** - HTTP handlers, including avatar upload

pub mod db;
pub mod handlers;
pub mod models;

pub use models::{Author, AuthorDetail, AuthorSummary, Book};
