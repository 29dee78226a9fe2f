//! Design validation and the write path shared by create, update and the
//! dry-run validation endpoint.

use crate::error::DesignError;
use crate::fields::validate_fields;
use crate::generator::bind_design;
use crate::minify::Minifier;
use crate::template::{check_syntax, decode_design};
use crate::types::{DbId, Fields};

/// A design as submitted by a client, before decoding.
#[derive(Debug, Clone, Copy)]
pub struct DesignInput<'a> {
    pub name: &'a str,
    pub user_id: Option<DbId>,
    /// Base64-encoded HTML template.
    pub design: &'a str,
    pub fields: Option<&'a Fields>,
}

/// Check required values and field shapes.
///
/// The order of the checks is part of the contract: name, owner, payload,
/// then fields.
pub fn validate_design(input: &DesignInput<'_>) -> Result<(), DesignError> {
    if input.name.is_empty() {
        return Err(DesignError::NameIsEmpty);
    }
    if input.user_id.is_none() {
        return Err(DesignError::UserIdIsEmpty);
    }
    if input.design.is_empty() {
        return Err(DesignError::DesignIsEmpty);
    }
    if let Some(fields) = input.fields {
        validate_fields(fields)?;
    }
    Ok(())
}

/// Validate, decode and syntax-check a design, returning the decoded HTML.
pub fn decode_checked(input: &DesignInput<'_>) -> Result<String, DesignError> {
    validate_design(input)?;
    let html = decode_design(input.design)?;
    check_syntax(&html)?;
    Ok(html)
}

/// Run the full write path and return the minified template to persist.
pub fn prepare_for_storage(
    input: &DesignInput<'_>,
    minifier: &dyn Minifier,
) -> Result<String, DesignError> {
    let html = decode_checked(input)?;
    minifier
        .html(&html)
        .map_err(|source| DesignError::UnableToMinify { source })
}

/// Validate a design without persisting it.
///
/// When fields are supplied the template is also executed against them so
/// missing or mismatched placeholders are caught up front.
pub fn dry_run(input: &DesignInput<'_>) -> Result<(), DesignError> {
    let html = decode_checked(input)?;
    if input.fields.is_some() {
        bind_design(&html, input.fields)?;
    }
    Ok(())
}
