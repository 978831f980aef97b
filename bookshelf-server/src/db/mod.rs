//! Database layer - connection pool and book stores
//!
//! # Design Principles
//!
//! - One pool handle built at startup and injected, never a global
//! - One SQL statement per store call, no multi-statement transactions
//! - `BookStore` is the seam; handlers never see `PgPool` directly

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryBookStore;
pub use pool::{create_pool, create_pool_with_options, ensure_schema};
pub use postgres::PgBookStore;
pub use store::{BookStore, DbError};
