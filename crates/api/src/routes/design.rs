//! Route definitions for the `/design` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::design;
use crate::state::AppState;

/// ```text
/// GET    /design            -> list (?count=&page=&search=)
/// POST   /design            -> create
/// POST   /design/validate   -> validate
/// GET    /design/{id}       -> get_by_id
/// PUT    /design/{id}       -> update
/// DELETE /design/{id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/design", get(design::list).post(design::create))
        .route("/design/validate", post(design::validate))
        .route(
            "/design/{id}",
            get(design::get_by_id)
                .put(design::update)
                .delete(design::delete),
        )
}
