use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::response::Response;

use crate::routing::Next;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log method, path, remote address and request id before the handler
/// runs, then the status and latency once it finishes.
pub async fn log_requests<S>(req: Request, next: Next<S>) -> Response
where
    S: Send + 'static,
{
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.to_string());
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    tracing::info!(%method, %path, %remote, %request_id, "Incoming request");

    let started = Instant::now();
    let response = next.run(req).await;

    tracing::debug!(
        %method,
        %path,
        %request_id,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );
    response
}
