//! Shared response bodies for API handlers.
//!
//! Success bodies are returned bare (no envelope) with camelCase keys.

use pdfgen_core::pagination::Pagination;
use pdfgen_core::types::DbId;
use pdfgen_db::models::design::Design;
use serde::Serialize;

/// `{ "id": ... }` acknowledgement for writes.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: DbId,
}

/// `{ "message": ... }` acknowledgement with no resource attached.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// One page of designs plus page metadata.
#[derive(Debug, Serialize)]
pub struct ListDesignResponse {
    pub designs: Vec<Design>,
    pub pagination: Pagination,
}
