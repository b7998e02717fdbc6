//! Handlers for authentication (register, login, token introspection).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bson::oid::ObjectId;
use serde::Serialize;

use filmoteca_core::error::CoreError;
use filmoteca_core::user::{LoginUser, RegisterUser};
use filmoteca_db::models::user::{CreateUser, User};
use filmoteca_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::require_json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Public user info returned by register, login, and introspection.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// Response body for `POST /login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

// ---------------------------------------------------------------------------
// POST /register
// ---------------------------------------------------------------------------

/// Register a new user. The password is stored only as an Argon2id hash.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterUser>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let registration = require_json(body)?.validate()?;

    // Friendly pre-check; the unique index still catches races.
    if UserRepo::find_by_email(&state.db, &registration.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "E-mail já cadastrado.".to_string(),
        )));
    }

    let password_hash = hash_password(&registration.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        name: registration.name,
        email: registration.email,
        password_hash,
        role: registration.role,
    };
    let user = UserRepo::create(&state.db, &input).await?;
    tracing::info!(id = %user.id, email = %user.email, "User registered");

    Ok((StatusCode::CREATED, Json(UserInfo::from(&user))))
}

// ---------------------------------------------------------------------------
// POST /login
// ---------------------------------------------------------------------------

/// Authenticate with e-mail + password, returning a 1-hour token.
///
/// The mismatch error is identical whether the e-mail is unknown or the
/// password is wrong, so this endpoint cannot be used to probe for
/// registered e-mails.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginUser>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let credentials = require_json(body)?.validate()?;

    let user = UserRepo::find_by_email(&state.db, &credentials.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&credentials.password, &user.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let token = generate_token(
        &user.id.to_hex(),
        &user.name,
        &user.email,
        &user.role,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::info!(id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo::from(&user),
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Credenciais inválidas.".to_string()))
}

// ---------------------------------------------------------------------------
// GET /me
// ---------------------------------------------------------------------------

/// Introspect the bearer token, returning the live user record.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserInfo>> {
    let oid = ObjectId::parse_str(&auth.user_id)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Token inválido.".to_string())))?;

    let user = UserRepo::find_by_id(&state.db, oid)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Usuário não existe mais.".to_string()))
        })?;

    Ok(Json(UserInfo::from(&user)))
}
