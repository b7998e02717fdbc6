//! Handlers for the `/movies` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bson::oid::ObjectId;
use serde::Serialize;

use filmoteca_core::error::CoreError;
use filmoteca_core::filter::{self, ListMoviesParams};
use filmoteca_core::movie::{CreateMovie, Movie, UpdateMovie};
use filmoteca_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::require_json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `GET /movies`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieListResponse {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub items: Vec<Movie>,
}

/// Response body for `DELETE /movies/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a path id into the store's native identifier format.
///
/// An unparsable id is a caller error (400), distinct from an id that
/// parses but resolves to nothing (404).
fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::Core(CoreError::Validation("ID inválido.".to_string())))
}

fn movie_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Filme",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// GET /movies
// ---------------------------------------------------------------------------

/// Filtered, paginated movie listing.
///
/// Filter parsing is permissive by contract: malformed values degrade
/// to "no filter", so this endpoint never rejects input.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListMoviesParams>,
) -> AppResult<Json<MovieListResponse>> {
    let (movie_filter, page) = filter::build(&params);
    let result = MovieRepo::list(&state.db, &movie_filter, &page).await?;

    tracing::debug!(
        total = result.total,
        page = page.number,
        returned = result.items.len(),
        "Listed movies"
    );

    Ok(Json(MovieListResponse {
        page: page.number,
        page_size: page.size,
        total: result.total,
        total_pages: (result.total as u64).div_ceil(page.size as u64) as i64,
        items: result.items,
    }))
}

// ---------------------------------------------------------------------------
// GET /movies/{id}
// ---------------------------------------------------------------------------

/// Get a single movie by id, normalized like every other read.
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    let oid = parse_object_id(&id)?;
    let movie = MovieRepo::find_by_id(&state.db, oid)
        .await?
        .ok_or_else(|| movie_not_found(&id))?;
    Ok(Json(movie))
}

// ---------------------------------------------------------------------------
// POST /movies
// ---------------------------------------------------------------------------

/// Create a movie after validating required fields.
///
/// Whether the title is required depends on the configured validation
/// policy (`STRICT_VALIDATION`).
pub async fn create_movie(
    State(state): State<AppState>,
    body: Result<Json<CreateMovie>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = require_json(body)?;
    let new = input.validate(state.config.validation_policy())?;

    let created = MovieRepo::create(&state.db, &new).await?;
    tracing::info!(id = %created.id, title = %created.title, "Movie created");
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// PUT /movies/{id}
// ---------------------------------------------------------------------------

/// Partially update a movie: only the supplied fields change.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateMovie>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let oid = parse_object_id(&id)?;
    let changes = require_json(body)?.validate()?;

    let updated = MovieRepo::update(&state.db, oid, &changes)
        .await?
        .ok_or_else(|| movie_not_found(&id))?;
    tracing::info!(id = %updated.id, "Movie updated");
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// DELETE /movies/{id}
// ---------------------------------------------------------------------------

/// Delete a movie by id.
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let oid = parse_object_id(&id)?;
    let deleted = MovieRepo::delete(&state.db, oid).await?;
    if !deleted {
        return Err(movie_not_found(&id));
    }

    tracing::info!(%id, "Movie deleted");
    Ok(Json(DeleteResponse {
        message: "Filme removido com sucesso.".to_string(),
        id,
    }))
}
