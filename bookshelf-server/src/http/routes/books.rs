//! Book endpoints
//!
//! `/books/` and `/books` are routed identically.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryPairs, ValidBookId};
use crate::http::server::AppState;
use crate::models::{Book, BookPatch, NewBook};

/// The search term: first `title` value, with an empty `?title=` treated as absent.
fn search_term(query: &QueryPairs) -> Option<&str> {
    query.first("title").filter(|t| !t.is_empty())
}

/// Update response
#[derive(Serialize)]
pub struct UpdatedResponse {
    pub message: &'static str,
    pub data: Book,
}

/// Delete response
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /books/?title= - list all books, or those whose title matches
async fn list_books(
    State(state): State<Arc<AppState>>,
    query: QueryPairs,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.store.list(search_term(&query)).await?;

    // An empty result is reported as 404, not an empty array
    if books.is_empty() {
        return Err(ApiError::NoResults { resource: "book" });
    }
    Ok(Json(books))
}

/// GET /books/{id} - get a single book
async fn get_book(
    State(state): State<Arc<AppState>>,
    ValidBookId(id): ValidBookId,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "book",
            id: id.to_string(),
        })?;

    Ok(Json(book))
}

/// POST /books/ - create a new book
async fn create_book(
    State(state): State<Arc<AppState>>,
    JsonBody(new): JsonBody<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state.store.create(new).await?;
    tracing::info!(id = book.id, "book created");

    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /books/{id} - merge a patch over an existing book
///
/// Existence is checked before the body is looked at.
async fn update_book(
    State(state): State<Arc<AppState>>,
    ValidBookId(id): ValidBookId,
    body: Result<JsonBody<BookPatch>, ApiError>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let existing = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "book",
            id: id.to_string(),
        })?;

    let JsonBody(patch) = body?;
    if patch.is_noop() {
        tracing::debug!(%id, "empty patch, skipping write");
        return Ok(Json(UpdatedResponse {
            message: "Book updated successfully",
            data: existing,
        }));
    }

    let merged = patch.merge(existing);
    state.store.update(&merged).await?;
    tracing::info!(id = merged.id, "book updated");

    Ok(Json(UpdatedResponse {
        message: "Book updated successfully",
        data: merged,
    }))
}

/// DELETE /books/{id} - hard delete
async fn delete_book(
    State(state): State<Arc<AppState>>,
    ValidBookId(id): ValidBookId,
) -> Result<Json<MessageResponse>, ApiError> {
    if state.store.get(id).await?.is_none() {
        return Err(ApiError::NotFound {
            resource: "book",
            id: id.to_string(),
        });
    }

    state.store.delete(id).await?;
    tracing::info!(%id, "book deleted");

    Ok(Json(MessageResponse {
        message: "Book deleted successfully",
    }))
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
}
