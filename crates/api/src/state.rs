use std::sync::Arc;

use mongodb::Database;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable: the driver's `Database` handle shares a
/// pooled client internally, and the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the application database.
    pub db: Database,
    /// Server configuration (validation policy, JWT secret, timeouts).
    pub config: Arc<ServerConfig>,
}
