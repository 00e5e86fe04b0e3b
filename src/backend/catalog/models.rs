//! Catalog Models
//!
//! Row types for authors and books, and the request bodies that create or
//! change them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::{require_text, SharedError};

/// Author row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Public URL of the uploaded avatar
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Author with the books they own, as returned by detail endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorDetail {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}

/// Row of the author list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthorSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Book row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Book fields without an owner, used when creating an author with books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub year: i64,
}

/// POST /api/authors body
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub books: Vec<BookFields>,
}

/// Validated author creation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub books: Vec<NewBook>,
}

impl CreateAuthorRequest {
    pub fn validate(self) -> Result<NewAuthor, SharedError> {
        let first_name = require_text("first_name", self.first_name)?;
        let last_name = require_text("last_name", self.last_name)?;
        let books = self
            .books
            .into_iter()
            .map(BookFields::validate)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewAuthor {
            first_name,
            last_name,
            books,
        })
    }
}

/// PATCH /api/authors/{id} body; blank values leave the column unchanged
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateAuthorRequest {
    /// Drop absent and blank fields
    pub fn normalized(self) -> (Option<String>, Option<String>) {
        (
            require_text("first_name", self.first_name).ok(),
            require_text("last_name", self.last_name).ok(),
        )
    }
}

/// `{title, year}` as sent by clients
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct BookFields {
    pub title: Option<String>,
    pub year: Option<i64>,
}

impl BookFields {
    /// Require both fields
    pub fn validate(self) -> Result<NewBook, SharedError> {
        let title = require_text("title", self.title)?;
        let year = self.year.ok_or_else(|| SharedError::missing("year"))?;
        Ok(NewBook { title, year })
    }
}

/// POST /api/books body
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub author_id: Option<i64>,
}

impl CreateBookRequest {
    /// Require all fields; returns the book fields and the owner id
    pub fn validate(self) -> Result<(NewBook, i64), SharedError> {
        let book = BookFields {
            title: self.title,
            year: self.year,
        }
        .validate()?;
        let author_id = self.author_id.ok_or_else(|| SharedError::missing("author_id"))?;
        Ok((book, author_id))
    }
}

/// PATCH /api/books/{id} body
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PatchBookRequest {
    pub title: Option<String>,
    pub year: Option<i64>,
}
