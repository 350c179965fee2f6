use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state passed to every handler.
///
/// Cheaply cloneable: the pool is reference counted internally and the
/// configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: locus_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
