//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{BookId, ValidationError};

/// Extract and validate a book id from path
pub struct ValidBookId(pub BookId);

impl<S> FromRequestParts<S> for ValidBookId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::Validation(ValidationError::InvalidId {
                    value: e.body_text(),
                })
            })?;

        Ok(Self(BookId::parse(&id)?))
    }
}

/// Query string as ordered key/value pairs.
///
/// Repeated keys are kept, so lookups can take the first occurrence
/// instead of rejecting the request.
pub struct QueryPairs(pub Vec<(String, String)>);

impl QueryPairs {
    /// First value for `key`, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::Validation(ValidationError::MalformedQuery {
                    reason: e.body_text(),
                })
            })?;

        Ok(Self(pairs))
    }
}

/// JSON body whose rejections are reported as 400 validation errors
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(malformed_body)?;

        Ok(Self(value))
    }
}

fn malformed_body(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(ValidationError::MalformedBody {
        reason: rejection.body_text(),
    })
}
