pub mod auth;
pub mod design;
pub mod generator;
pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register, /login, /refresh                      public
///
/// /user                                            get, update own profile
///
/// /design                                          list, create
/// /design/validate                                 dry-run validation
/// /design/{id}                                     get, update, delete
///
/// /generate                                        render a design to PDF
/// ```
///
/// Everything except the auth routes requires a Bearer access token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(user::router())
        .merge(design::router())
        .merge(generator::router())
}
