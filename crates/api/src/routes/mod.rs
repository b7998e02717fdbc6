pub mod auth;
pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health              liveness probe (GET)
///
/// /register            register (POST)
/// /login               login (POST)
/// /me                  token introspection (GET, requires auth)
///
/// /movies              list (GET), create (POST)
/// /movies/{id}         get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(auth::router()).merge(movies::router())
}
