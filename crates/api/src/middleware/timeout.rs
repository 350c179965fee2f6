use std::time::Duration;

use axum::extract::Request;
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::routing::{BoxFuture, Next};

/// Abort the rest of the chain after `limit`, answering 408.
///
/// Dropping the inner future cancels any in-flight query and returns its
/// connection to the pool.
pub fn timeout<S>(limit: Duration) -> impl Fn(Request, Next<S>) -> BoxFuture + Clone
where
    S: Send + 'static,
{
    move |req: Request, next: Next<S>| -> BoxFuture {
        Box::pin(async move {
            match tokio::time::timeout(limit, next.run(req)).await {
                Ok(response) => response,
                Err(_) => {
                    tracing::warn!(timeout_ms = limit.as_millis() as u64, "Request timed out");
                    AppError::RequestTimeout.into_response()
                }
            }
        })
    }
}
