//! JSON body extractor that tolerates a missing body.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Request body parsed as a JSON object, or `None`.
///
/// Unlike [`axum::Json`] this does not require a `Content-Type` header and
/// never rejects a well-formed body for its shape:
///
/// - empty or whitespace-only body: `None`
/// - valid JSON that is not an object (`[]`, `"x"`, `null`, ...): `None`
/// - a JSON object: `Some(T)`
/// - anything that is not JSON: [`AppError::InvalidJson`] (400)
///
/// Handlers that need specific fields decide for themselves what a `None`
/// means.
///
/// ```ignore
/// async fn create(OptionalJson(payload): OptionalJson<CreateItem>) -> Response {
///     let Some(payload) = payload else {
///         return StatusCode::BAD_REQUEST.into_response();
///     };
///     // ...
/// }
/// ```
#[derive(Debug)]
pub struct OptionalJson<T>(pub Option<T>);

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(None));
        }

        let value: Value = serde_json::from_slice(&bytes)?;
        if !value.is_object() {
            return Ok(OptionalJson(None));
        }

        Ok(OptionalJson(Some(serde_json::from_value(value)?)))
    }
}
