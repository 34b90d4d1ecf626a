//! Extractors whose rejections use the service error body

use crate::Error;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// JSON request body. Malformed or mistyped payloads are rejected with
/// `400 invalid` instead of axum's plain-text 422.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| Error::Validation(format!("Failed to read request body: {e}")))?;

        if bytes.is_empty() {
            return Err(Error::Validation("Request body is empty".to_string()));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| Error::Validation(format!("Invalid JSON body: {e}")))
    }
}

/// Query string parameters with the same rejection shape as [`JsonBody`].
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| QueryParams(value))
            .map_err(|rejection| Error::Validation(rejection.body_text()))
    }
}

/// Numeric record id from the `:id` path segment.
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::Validation(rejection.body_text()))?;

        raw.parse::<i64>()
            .map(IdPath)
            .map_err(|_| Error::Validation(format!("Invalid id '{raw}': expected an integer")))
    }
}
