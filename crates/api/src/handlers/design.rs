//! Handlers for the `/design` resource.
//!
//! Every operation is scoped to the authenticated caller.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use pdfgen_core::design::{dry_run, prepare_for_storage, DesignInput};
use pdfgen_core::error::{CoreError, DesignError};
use pdfgen_core::pagination::{parse_page_params, ListQuery};
use pdfgen_core::types::{DbId, Fields};
use pdfgen_db::models::design::{CreateDesign, Design, UpdateDesign};
use pdfgen_db::repositories::DesignRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{IdResponse, ListDesignResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for create, update and validate.
///
/// `design` is the base64-encoded HTML template.
#[derive(Debug, Deserialize)]
pub struct DesignRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub design: String,
    pub fields: Option<Fields>,
}

impl DesignRequest {
    fn as_input(&self, user_id: DbId) -> DesignInput<'_> {
        DesignInput {
            name: &self.name,
            user_id: Some(user_id),
            design: &self.design,
            fields: self.fields.as_ref(),
        }
    }
}

/// Query parameters for `GET /design`.
///
/// Kept as raw strings so missing and malformed values produce the
/// listing's own error messages.
#[derive(Debug, Deserialize)]
pub struct ListDesignParams {
    pub count: Option<String>,
    pub page: Option<String>,
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /design
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<DesignRequest>, JsonRejection>,
) -> AppResult<Json<IdResponse>> {
    let Json(input) = payload.map_err(|_| DesignError::UnableToReadRequest)?;
    let template = prepare_for_storage(&input.as_input(auth.user_id), state.minifier.as_ref())?;

    let create = CreateDesign {
        id: DbId::new_v4(),
        user_id: auth.user_id,
        name: input.name,
        template,
        fields: input.fields,
    };
    let design = DesignRepo::create(&state.pool, &create)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %auth.user_id, "Failed to save design");
            DesignError::UnableToSave
        })?;

    tracing::info!(design_id = %design.id, user_id = %auth.user_id, "Design created");
    Ok(Json(IdResponse { id: design.id }))
}

/// GET /design?count=&page=&search=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListDesignParams>,
) -> AppResult<Json<ListDesignResponse>> {
    let (limit, page) = parse_page_params(params.count.as_deref(), params.page.as_deref())?;
    let query = ListQuery::new(auth.user_id, limit, page).with_search(params.search.as_deref());

    let result = if query.search.is_some() {
        DesignRepo::search(&state.pool, &query).await
    } else {
        DesignRepo::list_by_user_id(&state.pool, &query).await
    };
    let (designs, pagination) = result.map_err(|e| {
        tracing::error!(error = %e, user_id = %auth.user_id, "Failed to list designs");
        DesignError::UnableToGetDesigns
    })?;

    Ok(Json(ListDesignResponse {
        designs,
        pagination,
    }))
}

/// GET /design/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Design>> {
    let Path(id) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let design = DesignRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Design",
            id,
        })?;
    Ok(Json(design))
}

/// PUT /design/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<DesignRequest>, JsonRejection>,
) -> AppResult<Json<IdResponse>> {
    let Path(id) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Json(input) = payload.map_err(|_| DesignError::UnableToReadRequest)?;
    let template = prepare_for_storage(&input.as_input(auth.user_id), state.minifier.as_ref())?;

    let update = UpdateDesign {
        name: input.name,
        template,
        fields: input.fields,
    };
    DesignRepo::update(&state.pool, auth.user_id, id, &update)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, design_id = %id, "Failed to update design");
            DesignError::UnableToUpdate
        })?
        .ok_or(CoreError::NotFound {
            entity: "Design",
            id,
        })?;

    Ok(Json(IdResponse { id }))
}

/// DELETE /design/{id}
///
/// Idempotent for the owner: deleting an already-deleted design succeeds
/// without moving its deletion time.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<IdResponse>> {
    let Path(id) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let deleted = DesignRepo::soft_delete(&state.pool, auth.user_id, id).await?;
    if !deleted && !DesignRepo::exists_including_deleted(&state.pool, auth.user_id, id).await? {
        return Err(CoreError::NotFound {
            entity: "Design",
            id,
        }
        .into());
    }

    Ok(Json(IdResponse { id }))
}

/// POST /design/validate
///
/// Run the write-path checks without persisting. Supplied fields are bound
/// to the template as well.
pub async fn validate(
    auth: AuthUser,
    payload: Result<Json<DesignRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(input) = payload.map_err(|_| DesignError::UnableToReadRequest)?;
    dry_run(&input.as_input(auth.user_id))?;

    Ok(Json(MessageResponse {
        message: "design is good to go",
    }))
}
