//! Design entity model and DTOs.

use pdfgen_core::types::{DbId, Fields, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A design row from the `design` table.
///
/// `template` is serialized as `design` to match the request field the
/// template was submitted under.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    #[serde(rename = "design")]
    pub template: String,
    pub fields: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
}

impl Design {
    /// Stored default fields as a map, if any.
    pub fn fields_map(&self) -> Option<&Fields> {
        self.fields.as_ref().and_then(|f| f.as_object())
    }
}

/// DTO for inserting a design. The id is assigned by the caller.
#[derive(Debug, Clone)]
pub struct CreateDesign {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    /// Minified template.
    pub template: String,
    pub fields: Option<Fields>,
}

/// DTO for replacing a design's mutable columns.
///
/// Every column is written, so `fields: None` clears stored defaults.
#[derive(Debug, Clone)]
pub struct UpdateDesign {
    pub name: String,
    pub template: String,
    pub fields: Option<Fields>,
}
