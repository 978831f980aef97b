//! Postgres book store
//!
//! One statement per call against `mst_book`:
//! - list: SELECT, optionally filtered with ILIKE
//! - create: INSERT ... RETURNING
//! - update: full-row UPDATE keyed by id
//! - delete: DELETE keyed by id

use async_trait::async_trait;
use sqlx::PgPool;

use super::store::{BookStore, DbError};
use crate::models::{Book, BookId, NewBook};

/// Book store over a shared connection pool
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self, title: Option<&str>) -> Result<Vec<Book>, DbError> {
        let books = match title {
            Some(term) => {
                sqlx::query_as::<_, Book>(
                    r#"
                    SELECT id, title, author, release_year, pages
                    FROM mst_book
                    WHERE title ILIKE $1 ESCAPE '\'
                    ORDER BY id
                    "#,
                )
                .bind(like_pattern(term))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Book>(
                    r#"
                    SELECT id, title, author, release_year, pages
                    FROM mst_book
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(books)
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, DbError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, release_year, pages
            FROM mst_book
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO mst_book (title, author, release_year, pages)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.release_year)
        .bind(book.pages)
        .fetch_one(&self.pool)
        .await?;

        Ok(Book::from_new(id, book))
    }

    async fn update(&self, book: &Book) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE mst_book
            SET title = $1, author = $2, release_year = $3, pages = $4
            WHERE id = $5
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.release_year)
        .bind(book.pages)
        .bind(book.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::book_not_found(book.book_id()));
        }
        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM mst_book WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::book_not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, ensure_schema};

    #[test]
    fn like_pattern_wraps_term() {
        assert_eq!(like_pattern("dune"), "%dune%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p bookshelf-server -- --ignored

    async fn store() -> PgBookStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        ensure_schema(&pool).await.expect("schema");
        PgBookStore::new(pool)
    }

    fn sample(title: &str) -> NewBook {
        NewBook {
            title: title.into(),
            author: "Herbert".into(),
            release_year: "1965".into(),
            pages: 412,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_round_trips() {
        let store = store().await;
        let created = store.create(sample("Dune")).await.unwrap();
        let fetched = store.get(created.book_id()).await.unwrap();
        assert_eq!(fetched, Some(created.clone()));

        store.delete(created.book_id()).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn created_ids_are_unique() {
        let store = store().await;
        let a = store.create(sample("A")).await.unwrap();
        let b = store.create(sample("B")).await.unwrap();
        assert_ne!(a.id, b.id);

        store.delete(a.book_id()).await.unwrap();
        store.delete(b.book_id()).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_is_case_insensitive_and_literal() {
        let store = store().await;
        let marker = "Zq_Search%Marker";
        let hit = store.create(sample(marker)).await.unwrap();
        let miss = store.create(sample("ZqXSearchXMarker")).await.unwrap();

        let found = store.list(Some("zq_search%marker")).await.unwrap();
        assert!(found.iter().any(|b| b.id == hit.id));
        assert!(found.iter().all(|b| b.id != miss.id));

        store.delete(hit.book_id()).await.unwrap();
        store.delete(miss.book_id()).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_and_delete_missing_row_is_not_found() {
        let store = store().await;
        let created = store.create(sample("Gone")).await.unwrap();
        store.delete(created.book_id()).await.unwrap();

        assert!(matches!(
            store.update(&created).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(created.book_id()).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
