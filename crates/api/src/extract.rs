//! Request decoding helpers for handlers.

use axum::extract::Request;
use locus_core::error::CoreError;
use locus_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::routing::PathParams;

/// Upper bound on request body size.
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Parse the path placeholder `name` as an id.
pub fn path_id(req: &Request, name: &str) -> AppResult<DbId> {
    let raw = req
        .extensions()
        .get::<PathParams>()
        .and_then(|params| params.get(name))
        .ok_or_else(|| AppError::InternalError(format!("route has no {{{name}}} placeholder")))?;

    raw.parse()
        .map_err(|_| AppError::Core(CoreError::Validation("invalid id".to_string())))
}

/// Read and decode a JSON body of at most [`BODY_LIMIT`] bytes.
///
/// Unreadable, oversized and malformed bodies are all reported as
/// `invalid JSON`.
pub async fn json_body<T: DeserializeOwned>(req: Request) -> AppResult<T> {
    let bytes = axum::body::to_bytes(req.into_body(), BODY_LIMIT)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            invalid_json()
        })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        invalid_json()
    })
}

fn invalid_json() -> AppError {
    AppError::BadRequest("invalid JSON".to_string())
}
