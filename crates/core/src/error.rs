use crate::minify::MinifyError;
use crate::pdf::RenderError;
use crate::template::TemplateError;
use crate::types::DbId;

/// Failures shared by every resource: missing rows and rejected callers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Failures of the design write path and the render pipeline.
///
/// The `Display` text of every variant is the literal message returned to
/// API clients, so it must stay stable.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("name is empty")]
    NameIsEmpty,

    #[error("userId is empty")]
    UserIdIsEmpty,

    #[error("design is empty")]
    DesignIsEmpty,

    #[error("unsupported field type for field {field}")]
    UnsupportedFieldType { field: String },

    #[error("designId is empty")]
    DesignIdIsEmpty,

    #[error("count is empty")]
    CountIsEmpty,

    #[error("count is invalid")]
    CountInvalid,

    #[error("page is empty")]
    PageIsEmpty,

    #[error("page is invalid")]
    PageInvalid,

    #[error("unable to read request body")]
    UnableToReadRequest,

    /// The payload is not valid standard base64.
    #[error("design must be base64 encoded")]
    MustBeBase64Encoded,

    /// The payload decoded but the bytes are not UTF-8 text.
    #[error("invalid design")]
    InvalidDesign,

    #[error("invalid html design")]
    InvalidHtml {
        #[source]
        source: TemplateError,
    },

    #[error("unable to minify design")]
    UnableToMinify {
        #[source]
        source: MinifyError,
    },

    #[error("unable to save design")]
    UnableToSave,

    #[error("unable to update design")]
    UnableToUpdate,

    #[error("unable to get design")]
    UnableToGetDesign,

    #[error("unable to get designs")]
    UnableToGetDesigns,

    #[error("unable to parse design")]
    UnableToParseDesign {
        #[source]
        source: TemplateError,
    },

    #[error("unable to match fields to design")]
    UnableToMatchFieldsToDesign {
        #[source]
        source: TemplateError,
    },

    #[error("unable to render pdf")]
    UnableToRenderPdf {
        #[source]
        source: RenderError,
    },
}

impl DesignError {
    /// Whether the failure was caused by the caller's input rather than by
    /// persistence or the renderer.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DesignError::UnableToSave
                | DesignError::UnableToUpdate
                | DesignError::UnableToGetDesigns
                | DesignError::UnableToRenderPdf { .. }
        )
    }
}
