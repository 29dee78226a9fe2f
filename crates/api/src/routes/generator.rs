use axum::routing::post;
use axum::Router;

use crate::handlers::generator;
use crate::state::AppState;

/// `POST /generate -> generate`
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generator::generate))
}
