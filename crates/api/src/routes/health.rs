use axum::extract::Request;

use crate::routing::Router;
use crate::state::AppState;

async fn health_check(_state: AppState, _req: Request) -> &'static str {
    "ok"
}

pub fn mount(api: &Router<AppState>) {
    api.get("/health", health_check);
}
