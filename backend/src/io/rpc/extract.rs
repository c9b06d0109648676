//! Extractors that turn a request into a validated procedure input.
//!
//! Rejections from axum's own `Json` and `Query` extractors are reported in the
//! same error body as every other failure, with a `400` status.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use shared::Validate;
use tracing::warn;

use super::error::ApiError;

/// JSON body of a mutation, validated before the handler runs
#[derive(Debug)]
pub struct RpcJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for RpcJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!("Malformed procedure input: {}", rejection.body_text());
            ApiError::bad_request(rejection.body_text())
        })?;

        value.validate()?;
        Ok(RpcJson(value))
    }
}

/// Query-string input of a lookup procedure
#[derive(Debug)]
pub struct RpcQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for RpcQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!("Malformed procedure input: {}", rejection.body_text());
                ApiError::bad_request(rejection.body_text())
            })?;

        Ok(RpcQuery(value))
    }
}
