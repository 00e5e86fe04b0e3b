//! Catalog Handlers
//!
//! ```text
//! handlers/
//! ├── authors.rs  - /api/authors CRUD
//! ├── books.rs    - /api/books CRUD
//! └── avatar.rs   - /api/authors/avatar/{id} upload
//! ```

pub mod authors;
pub mod avatar;
pub mod books;

pub use authors::{create_author, delete_author, get_author, list_authors, update_author};
pub use avatar::upload_avatar;
pub use books::{create_book, delete_book, get_book, list_books, patch_book, replace_book};
