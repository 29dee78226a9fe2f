//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use pdfgen_core::error::CoreError;
use pdfgen_core::types::DbId;

use crate::auth::jwt::validate_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// Message returned for every authentication failure.
const NOT_AUTHORISED: &str = "not authorised";

/// Authenticated user extracted from a Bearer access token in the
/// `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty())
            .ok_or_else(not_authorised)?;

        let claims = validate_access_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            not_authorised()
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

fn not_authorised() -> AppError {
    AppError::Core(CoreError::Unauthorized(NOT_AUTHORISED.into()))
}
