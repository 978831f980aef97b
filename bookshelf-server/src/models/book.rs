//! Book entity: row mapping, create payload, and update patch

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Book identifier (store-assigned `SERIAL` key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(i32);

impl BookId {
    /// Parse a path segment into an id.
    ///
    /// Accepts what `str::parse::<i32>` accepts, including a leading sign.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        raw.parse::<i32>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidId {
                value: raw.to_owned(),
            })
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Book record, as stored in `mst_book` and returned over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub release_year: String,
    pub pages: i32,
}

impl Book {
    /// Attach a store-assigned id to a create payload.
    pub fn from_new(id: i32, new: NewBook) -> Self {
        Self {
            id,
            title: new.title,
            author: new.author,
            release_year: new.release_year,
            pages: new.pages,
        }
    }

    pub fn book_id(&self) -> BookId {
        BookId(self.id)
    }
}

/// Create payload.
///
/// Missing fields default; only structurally invalid JSON is rejected.
/// A client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub release_year: String,
    pub pages: i32,
}

/// Update payload.
///
/// Text fields that are absent or blank keep the stored value. `pages`
/// keeps the stored value only when absent or null, so an explicit zero
/// is written through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub release_year: Option<String>,
    pub pages: Option<i32>,
}

impl BookPatch {
    /// Merge this patch over the stored record. The id is never changed.
    pub fn merge(self, existing: Book) -> Book {
        Book {
            id: existing.id,
            title: non_blank(self.title).unwrap_or(existing.title),
            author: non_blank(self.author).unwrap_or(existing.author),
            release_year: non_blank(self.release_year).unwrap_or(existing.release_year),
            pages: self.pages.unwrap_or(existing.pages),
        }
    }

    /// True when merging would leave any record unchanged.
    pub fn is_noop(&self) -> bool {
        is_blank(&self.title)
            && is_blank(&self.author)
            && is_blank(&self.release_year)
            && self.pages.is_none()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dune() -> Book {
        Book {
            id: 1,
            title: "Dune".into(),
            author: "Herbert".into(),
            release_year: "1965".into(),
            pages: 412,
        }
    }

    #[test]
    fn book_id_parses_integers() {
        assert_eq!(BookId::parse("42").unwrap().get(), 42);
        assert_eq!(BookId::parse("-3").unwrap().get(), -3);
    }

    #[test]
    fn book_id_rejects_garbage() {
        assert!(BookId::parse("abc").is_err());
        assert!(BookId::parse("").is_err());
        assert!(BookId::parse("1.5").is_err());
        assert!(BookId::parse("99999999999").is_err());
    }

    #[test]
    fn book_serializes_camel_case() {
        let value = serde_json::to_value(dune()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "title": "Dune",
                "author": "Herbert",
                "releaseYear": "1965",
                "pages": 412
            })
        );
    }

    #[test]
    fn new_book_defaults_missing_fields() {
        let new: NewBook = serde_json::from_value(json!({ "title": "Emma" })).unwrap();
        assert_eq!(new.title, "Emma");
        assert_eq!(new.author, "");
        assert_eq!(new.release_year, "");
        assert_eq!(new.pages, 0);
    }

    #[test]
    fn new_book_ignores_client_id() {
        let new: NewBook =
            serde_json::from_value(json!({ "id": 99, "title": "Emma", "pages": 10 })).unwrap();
        let book = Book::from_new(3, new);
        assert_eq!(book.id, 3);
    }

    #[test]
    fn new_book_rejects_wrong_types() {
        let result: Result<NewBook, _> = serde_json::from_value(json!({ "pages": "many" }));
        assert!(result.is_err());
    }

    #[test]
    fn merge_pages_only_keeps_text_fields() {
        let patch = BookPatch {
            pages: Some(500),
            ..Default::default()
        };
        let merged = patch.merge(dune());
        assert_eq!(merged.title, "Dune");
        assert_eq!(merged.author, "Herbert");
        assert_eq!(merged.release_year, "1965");
        assert_eq!(merged.pages, 500);
    }

    #[test]
    fn merge_blank_text_keeps_existing() {
        let patch: BookPatch = serde_json::from_value(json!({
            "title": "   ",
            "author": "",
            "releaseYear": "\t"
        }))
        .unwrap();
        assert!(patch.is_noop());
        assert_eq!(patch.merge(dune()), dune());
    }

    #[test]
    fn merge_explicit_zero_pages_is_written() {
        let patch: BookPatch = serde_json::from_value(json!({ "pages": 0 })).unwrap();
        assert!(!patch.is_noop());
        assert_eq!(patch.merge(dune()).pages, 0);
    }

    #[test]
    fn merge_null_pages_keeps_existing() {
        let patch: BookPatch = serde_json::from_value(json!({ "pages": null })).unwrap();
        assert_eq!(patch.merge(dune()).pages, 412);
    }

    #[test]
    fn merge_replaces_non_blank_text() {
        let patch = BookPatch {
            title: Some("Dune Messiah".into()),
            release_year: Some("1969".into()),
            ..Default::default()
        };
        let merged = patch.merge(dune());
        assert_eq!(merged.id, 1);
        assert_eq!(merged.title, "Dune Messiah");
        assert_eq!(merged.author, "Herbert");
        assert_eq!(merged.release_year, "1969");
    }
}
