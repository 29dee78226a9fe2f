//! Handlers for registration, login and token refresh.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use pdfgen_core::accounts::{validate_login, validate_registration, AccountError};
use pdfgen_core::error::CoreError;
use pdfgen_core::roles::ROLE_NORMAL;
use pdfgen_core::types::DbId;
use pdfgen_db::models::user::{CreateUser, User};
use pdfgen_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_token_pair, validate_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::response::IdResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /refresh`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
}

/// Public user info embedded in [`LoginResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Create a `normal` account. Returns the new user's id.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<IdResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    validate_registration(&input.email, &input.password)?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AccountError::EmailExists.into());
    }

    let password_hash = hash_password(&input.password, &state.config.password_pepper)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        email: input.email,
        password_hash,
        role: ROLE_NORMAL.to_string(),
    };
    let user = UserRepo::create(&state.pool, &create)
        .await
        .map_err(|e| {
            // A concurrent registration can win the race past the lookup above.
            if is_unique_violation(&e) {
                AppError::Account(AccountError::EmailExists)
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(Json(IdResponse { id: user.id }))
}

/// POST /login
///
/// Authenticate with email + password. Unknown email and wrong password are
/// indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    validate_login(&input.email, &input.password)?;

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or(AccountError::InvalidCredentials)?;

    let password_valid =
        verify_password(&input.password, &state.config.password_pepper, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AccountError::InvalidCredentials.into());
    }

    Ok(Json(issue_tokens(&state, user)?))
}

/// POST /refresh
///
/// Exchange a valid refresh token for a new token pair.
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let claims = validate_refresh_token(&input.refresh_token, &state.config.jwt)
        .map_err(|_| CoreError::Unauthorized("not authorised".into()))?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("not authorised".into()))?;

    Ok(Json(issue_tokens(&state, user)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate an access/refresh pair for `user` and build the response.
fn issue_tokens(state: &AppState, user: User) -> AppResult<LoginResponse> {
    let pair = generate_token_pair(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
        },
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    })
}
