/**
 * Catalog Database Operations
 *
 * Queries for authors and books. Lookups by id return `Option` so callers
 * decide what a missing row means; removal returns whether a row was
 * deleted. Deleting an author removes its books through the
 * `ON DELETE CASCADE` foreign key.
 */

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::catalog::models::{Author, AuthorDetail, AuthorSummary, Book, NewAuthor, NewBook};

const AUTHOR_COLUMNS: &str = "id, first_name, last_name, avatar, created_at";
const BOOK_COLUMNS: &str = "id, title, year, author_id, created_at";

/// Create an author and any books sent along with it in one transaction
pub async fn create_author(pool: &SqlitePool, new_author: NewAuthor) -> Result<AuthorDetail, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let author = sqlx::query_as::<_, Author>(&format!(
        "INSERT INTO authors (first_name, last_name, avatar, created_at)
         VALUES (?, ?, NULL, ?)
         RETURNING {AUTHOR_COLUMNS}"
    ))
    .bind(&new_author.first_name)
    .bind(&new_author.last_name)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let mut books = Vec::with_capacity(new_author.books.len());
    for book in &new_author.books {
        let book = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, year, author_id, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING {BOOK_COLUMNS}"
        ))
        .bind(&book.title)
        .bind(book.year)
        .bind(author.id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        books.push(book);
    }

    tx.commit().await?;
    Ok(AuthorDetail { author, books })
}

/// List every author, oldest first
pub async fn list_authors(pool: &SqlitePool) -> Result<Vec<AuthorSummary>, sqlx::Error> {
    sqlx::query_as::<_, AuthorSummary>("SELECT id, first_name, last_name FROM authors ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Fetch one author row
pub async fn get_author(pool: &SqlitePool, id: i64) -> Result<Option<Author>, sqlx::Error> {
    sqlx::query_as::<_, Author>(&format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Fetch an author together with its books
pub async fn get_author_detail(pool: &SqlitePool, id: i64) -> Result<Option<AuthorDetail>, sqlx::Error> {
    let Some(author) = get_author(pool, id).await? else {
        return Ok(None);
    };
    let books = books_by_author(pool, id).await?;
    Ok(Some(AuthorDetail { author, books }))
}

/// Books owned by an author
pub async fn books_by_author(pool: &SqlitePool, author_id: i64) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE author_id = ? ORDER BY id"))
        .bind(author_id)
        .fetch_all(pool)
        .await
}

/// Change an author's names; `None` keeps the stored value
pub async fn update_author(
    pool: &SqlitePool,
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<Option<AuthorDetail>, sqlx::Error> {
    let updated = sqlx::query(
        "UPDATE authors
         SET first_name = COALESCE(?, first_name),
             last_name = COALESCE(?, last_name)
         WHERE id = ?",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(id)
    .execute(pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Ok(None);
    }
    get_author_detail(pool, id).await
}

/// Store the avatar URL of an author
pub async fn set_author_avatar(pool: &SqlitePool, id: i64, avatar_url: &str) -> Result<Option<AuthorDetail>, sqlx::Error> {
    let updated = sqlx::query("UPDATE authors SET avatar = ? WHERE id = ?")
        .bind(avatar_url)
        .bind(id)
        .execute(pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Ok(None);
    }
    get_author_detail(pool, id).await
}

/// Delete an author and, by cascade, its books
pub async fn delete_author(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let deleted = sqlx::query("DELETE FROM authors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(deleted.rows_affected() > 0)
}

/// Create a book owned by `author_id`
///
/// The caller checks that the author exists; a dangling id fails here with
/// a foreign key violation.
pub async fn create_book(pool: &SqlitePool, book: &NewBook, author_id: i64) -> Result<Book, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!(
        "INSERT INTO books (title, year, author_id, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING {BOOK_COLUMNS}"
    ))
    .bind(&book.title)
    .bind(book.year)
    .bind(author_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// List every book, oldest first
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Fetch one book
pub async fn get_book(pool: &SqlitePool, id: i64) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Change a book's title and/or year; `None` keeps the stored value
pub async fn update_book(
    pool: &SqlitePool,
    id: i64,
    title: Option<String>,
    year: Option<i64>,
) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!(
        "UPDATE books
         SET title = COALESCE(?, title),
             year = COALESCE(?, year)
         WHERE id = ?
         RETURNING {BOOK_COLUMNS}"
    ))
    .bind(title)
    .bind(year)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a book
pub async fn delete_book(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let deleted = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(deleted.rows_affected() > 0)
}
