//! Middlewares registered on the root router.
//!
//! - [`recover`] -- turns a handler panic into a 500 JSON response.
//! - [`log_requests`] -- logs each request and its outcome.
//! - [`timeout`] -- aborts requests that run too long with 408.

pub mod logging;
pub mod recover;
pub mod timeout;

pub use logging::log_requests;
pub use recover::recover;
pub use timeout::timeout;
