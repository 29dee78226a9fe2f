//! Handler for rendering a stored design to PDF.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pdfgen_core::error::DesignError;
use pdfgen_core::generator::{generate_pdf, validate_generate, GenerateInput};
use pdfgen_core::types::Fields;
use pdfgen_db::repositories::DesignRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /generate`.
#[derive(Debug, Deserialize)]
pub struct GeneratePdfRequest {
    #[serde(default, rename = "designId", alias = "DesignId")]
    pub design_id: String,
    pub fields: Option<Fields>,
}

/// POST /generate
///
/// Bind the request's fields (over the design's stored defaults) and return
/// the rendered PDF as `application/octet-stream`.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<GeneratePdfRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(input) = payload.map_err(|_| DesignError::UnableToReadRequest)?;
    let design_id = validate_generate(&GenerateInput {
        design_id: &input.design_id,
        fields: input.fields.as_ref(),
    })?;

    let design = DesignRepo::find_by_id(&state.pool, auth.user_id, design_id)
        .await?
        .ok_or(DesignError::UnableToGetDesign)?;

    let pdf = generate_pdf(
        state.renderer.as_ref(),
        &design.template,
        design.fields_map(),
        input.fields.as_ref(),
    )
    .await?;

    tracing::info!(design_id = %design.id, bytes = pdf.len(), "PDF generated");
    Ok(([(CONTENT_TYPE, "application/octet-stream")], pdf).into_response())
}
