//! Book store trait and error type
//!
//! Handlers talk to `dyn BookStore`. Postgres backs it in production,
//! `MemoryBookStore` backs it in tests and `--in-memory` mode.

use async_trait::async_trait;

use crate::models::{Book, BookId, NewBook};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} ids exhausted")]
    IdsExhausted { resource: &'static str },
}

impl DbError {
    pub(crate) fn book_not_found(id: BookId) -> Self {
        Self::NotFound {
            resource: "book",
            id: id.to_string(),
        }
    }
}

/// Storage operations for the book table (testable)
#[async_trait]
pub trait BookStore: Send + Sync {
    /// List books in ascending id order.
    ///
    /// With `title`, only books whose title contains it, ignoring case.
    async fn list(&self, title: Option<&str>) -> Result<Vec<Book>, DbError>;

    /// Fetch one book, `None` if absent.
    async fn get(&self, id: BookId) -> Result<Option<Book>, DbError>;

    /// Insert a book; the store assigns the id.
    async fn create(&self, book: NewBook) -> Result<Book, DbError>;

    /// Overwrite every column of the row with `book.id`.
    ///
    /// Returns `DbError::NotFound` if the row no longer exists.
    async fn update(&self, book: &Book) -> Result<(), DbError>;

    /// Hard delete by id.
    ///
    /// Returns `DbError::NotFound` if nothing was deleted.
    async fn delete(&self, id: BookId) -> Result<(), DbError>;
}
