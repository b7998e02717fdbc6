//! Request handlers.
//!
//! Each submodule provides async handler functions for a single
//! resource. Handlers delegate to the repositories in `filmoteca_db`
//! and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod movies;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::{AppError, AppResult};

/// Unwrap a JSON body, mapping malformed payloads to a 400.
///
/// Axum's default rejection would answer in plain text; routing it
/// through [`AppError`] keeps the `{"error", "code"}` body shape on
/// every failure path.
pub(crate) fn require_json<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}
