//! bookshelf-server: HTTP CRUD service for the book table
//!
//! Exposes create/read/update/delete/search over `mst_book` via axum,
//! with the store injected at startup so tests can run against memory.

pub mod db;
pub mod http;
pub mod models;

pub use db::{BookStore, DbError, MemoryBookStore, PgBookStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{Book, BookId, BookPatch, NewBook, ValidationError};
