//! Locations & assets API server library.
//!
//! Exposes the building blocks (config, state, routing, error handling,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod routing;
pub mod state;
