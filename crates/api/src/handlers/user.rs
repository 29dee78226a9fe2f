//! Handlers for the caller's own profile.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use pdfgen_core::accounts::{validate_profile_update, AccountError};
use pdfgen_core::error::CoreError;
use pdfgen_core::types::{DbId, Timestamp};
use pdfgen_db::models::user::{UpdateProfile, UserProfile};
use pdfgen_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /user`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Response body for `PUT /user`. Unset names are returned as empty strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub updated_at: Timestamp,
}

/// GET /user
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserProfile>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    Ok(Json(user.into()))
}

/// PUT /user
///
/// Replace the caller's email and names. The email may not belong to
/// another account.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<Json<UpdateUserResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    validate_profile_update(&input.email)?;

    if let Some(owner) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        if owner.id != auth.user_id {
            return Err(AccountError::UserWithEmailExists.into());
        }
    }

    let update = UpdateProfile {
        email: input.email,
        first_name: non_blank(input.first_name),
        last_name: non_blank(input.last_name),
    };
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &update)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Account(AccountError::UserWithEmailExists)
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;

    Ok(Json(UpdateUserResponse {
        id: user.id,
        email: user.email,
        first_name: user.first_name.unwrap_or_default(),
        last_name: user.last_name.unwrap_or_default(),
        updated_at: user.updated_at,
    }))
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
