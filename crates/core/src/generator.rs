//! The render path: resolve a design's fields, bind them into its template
//! and hand the resulting HTML to a [`PdfRenderer`].

use crate::error::DesignError;
use crate::fields::{merge_fields, validate_fields};
use crate::pdf::PdfRenderer;
use crate::template::{execute, parse_template};
use crate::types::{DbId, Fields};

/// A render request as submitted by a client.
#[derive(Debug, Clone, Copy)]
pub struct GenerateInput<'a> {
    pub design_id: &'a str,
    pub fields: Option<&'a Fields>,
}

/// Validate a render request and return the design id it targets.
///
/// An id that is not a well-formed UUID cannot match any design, so it is
/// reported the same way as an unknown one.
pub fn validate_generate(input: &GenerateInput<'_>) -> Result<DbId, DesignError> {
    if input.design_id.is_empty() {
        return Err(DesignError::DesignIdIsEmpty);
    }
    if let Some(fields) = input.fields {
        validate_fields(fields)?;
    }
    input
        .design_id
        .parse()
        .map_err(|_| DesignError::UnableToGetDesign)
}

/// Bind `fields` into `template`.
///
/// With no fields the template is returned unbound. Otherwise it is parsed
/// again and executed; a stored template that no longer parses is reported
/// as [`DesignError::UnableToParseDesign`], a binding failure as
/// [`DesignError::UnableToMatchFieldsToDesign`].
pub fn bind_design(template: &str, fields: Option<&Fields>) -> Result<String, DesignError> {
    let Some(fields) = fields else {
        return Ok(template.to_string());
    };

    let parsed =
        parse_template(template).map_err(|source| DesignError::UnableToParseDesign { source })?;
    execute(&parsed, fields).map_err(|source| DesignError::UnableToMatchFieldsToDesign { source })
}

/// Render a stored design to PDF bytes.
///
/// `stored` are the design's default fields, `request` the fields supplied
/// with this render; request values win (see [`merge_fields`]).
pub async fn generate_pdf(
    renderer: &dyn PdfRenderer,
    template: &str,
    stored: Option<&Fields>,
    request: Option<&Fields>,
) -> Result<Vec<u8>, DesignError> {
    let fields = merge_fields(stored, request);
    let html = bind_design(template, fields.as_ref())?;

    renderer
        .render(html)
        .await
        .map_err(|source| DesignError::UnableToRenderPdf { source })
}
