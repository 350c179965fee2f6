//! Resource handlers. Each is an `async fn(AppState, Request)` registered
//! on the router in [`crate::routes`].

pub mod assets;
pub mod locations;
