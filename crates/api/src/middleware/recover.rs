use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use futures::FutureExt;

use crate::error::AppError;
use crate::routing::Next;

/// Catch a panic raised anywhere below this middleware and answer with the
/// generic internal error. Other requests are unaffected.
pub async fn recover<S>(req: Request, next: Next<S>) -> Response
where
    S: Send + 'static,
{
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => AppError::InternalError(format!(
            "panic while handling {method} {path}: {}",
            panic_message(panic.as_ref())
        ))
        .into_response(),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic payload"
    }
}
