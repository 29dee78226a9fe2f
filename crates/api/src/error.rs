use std::error::Error as _;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pdfgen_core::accounts::AccountError;
use pdfgen_core::error::{CoreError, DesignError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain errors and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A generic domain error from `pdfgen_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A design write-path or render-pipeline failure.
    #[error(transparent)]
    Design(#[from] DesignError),

    /// A registration, login or profile failure.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned for every masked server-side failure.
const INTERNAL_MESSAGE: &str = "Sorry! Something is broken";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Design pipeline ---
            AppError::Design(err) => {
                if err.is_client_error() {
                    if let Some(source) = err.source() {
                        tracing::debug!(error = %err, source = %source, "Design rejected");
                    }
                    (StatusCode::BAD_REQUEST, "DESIGN_ERROR", err.to_string())
                } else {
                    match err.source() {
                        Some(source) => {
                            tracing::error!(error = %err, source = %source, "Design pipeline failed")
                        }
                        None => tracing::error!(error = %err, "Design pipeline failed"),
                    }
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        err.to_string(),
                    )
                }
            }

            // --- Accounts ---
            AppError::Account(err) => {
                let (status, code) = match err {
                    AccountError::EmailExists | AccountError::UserWithEmailExists => {
                        (StatusCode::CONFLICT, "CONFLICT")
                    }
                    AccountError::InvalidCredentials => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                    _ => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
                };
                (status, code, err.to_string())
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Whether `err` is a PostgreSQL unique constraint violation (code 23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == "23505")
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            if is_unique_violation(err) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use pdfgen_core::pdf::RenderError;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_design_errors_are_bad_requests() {
        let (status, body) = render(DesignError::NameIsEmpty.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name is empty");
    }

    #[tokio::test]
    async fn renderer_failure_keeps_its_message() {
        let err = DesignError::UnableToRenderPdf {
            source: RenderError::EmptyOutput,
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "unable to render pdf");
    }

    #[tokio::test]
    async fn account_errors_map_to_their_statuses() {
        let (status, _) = render(AccountError::PasswordIsEmpty.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = render(AccountError::EmailExists.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "user with email exists");

        let (status, _) = render(AccountError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn core_errors_map_to_their_statuses() {
        let id = pdfgen_core::types::DbId::new_v4();
        let (status, body) = render(CoreError::NotFound { entity: "Design", id }.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], format!("Design with id {id} not found"));

        let (status, body) = render(CoreError::Unauthorized("not authorised".into()).into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn internal_errors_are_masked() {
        let (status, body) = render(AppError::InternalError("secret detail".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }
}
