//! Domain models
//!
//! Wire and row types for the book entity. Path input is validated at
//! extraction; invalid input returns ValidationError, not panic.

pub mod book;
pub mod validation;

pub use book::{Book, BookId, BookPatch, NewBook};
pub use validation::ValidationError;
