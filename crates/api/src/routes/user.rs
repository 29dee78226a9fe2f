//! Route definitions for the `/user` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// ```text
/// GET /user  -> get_profile
/// PUT /user  -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/user", get(user::get_profile).put(user::update_profile))
}
