use std::sync::Arc;

use pdfgen_core::minify::Minifier;
use pdfgen_core::pdf::PdfRenderer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything except the pool is behind an `Arc`, and the
/// pool is itself a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pdfgen_db::DbPool,
    /// Server configuration (JWT secrets, pepper, renderer settings).
    pub config: Arc<ServerConfig>,
    /// Applied to every design before it is stored.
    pub minifier: Arc<dyn Minifier>,
    /// Turns bound designs into PDF bytes.
    pub renderer: Arc<dyn PdfRenderer>,
}
