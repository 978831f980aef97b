//! In-memory book store
//!
//! Same contract as the Postgres store, held in a `BTreeMap` so list
//! order matches `ORDER BY id`. Ids are never reused, mirroring `SERIAL`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{BookStore, DbError};
use crate::models::{Book, BookId, NewBook};

#[derive(Debug, Default)]
struct Inner {
    books: BTreeMap<i32, Book>,
    last_id: i32,
}

/// Book store held in process memory
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self, title: Option<&str>) -> Result<Vec<Book>, DbError> {
        let inner = self.inner.read().await;
        let needle = title.map(str::to_lowercase);

        Ok(inner
            .books
            .values()
            .filter(|book| match &needle {
                Some(n) => book.title.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, DbError> {
        Ok(self.inner.read().await.books.get(&id.get()).cloned())
    }

    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let mut inner = self.inner.write().await;
        inner.last_id = inner
            .last_id
            .checked_add(1)
            .ok_or(DbError::IdsExhausted { resource: "book" })?;
        let book = Book::from_new(inner.last_id, book);
        inner.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, book: &Book) -> Result<(), DbError> {
        let mut inner = self.inner.write().await;
        match inner.books.get_mut(&book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(())
            }
            None => Err(DbError::book_not_found(book.book_id())),
        }
    }

    async fn delete(&self, id: BookId) -> Result<(), DbError> {
        self.inner
            .write()
            .await
            .books
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| DbError::book_not_found(id))
    }
}
