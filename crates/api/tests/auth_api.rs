//! HTTP-level integration tests for registration, login, refresh and the
//! profile endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    access_token_for, body_json, get, get_auth, login, post_json, put_json_auth, register,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = register(app, "ann@test.com").await;
    assert_eq!(id.len(), 36, "id should be a UUID string");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_short_password_is_unprocessable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "ann@test.com", "password": "short" });
    let response = post_json(app, "/register", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "password is less than 8 characters");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_missing_email_is_unprocessable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/register", json!({ "password": TEST_PASSWORD })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "email is empty");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_malformed_email_is_unprocessable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "not-an-email", "password": TEST_PASSWORD });
    let response = post_json(app, "/register", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "email is invalid");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_register_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "dup@test.com").await;

    let body = json!({ "email": "dup@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "user with email exists");
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Login / refresh
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_returns_user_and_token_pair(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = register(app.clone(), "ann@test.com").await;

    let json = login(app, "ann@test.com").await;
    assert_eq!(json["user"]["id"], id);
    assert_eq!(json["user"]["email"], "ann@test.com");
    assert!(json["accessToken"].is_string());
    assert!(json["refreshToken"].is_string());
    assert_ne!(json["accessToken"], json["refreshToken"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "ann@test.com").await;

    let body = json!({ "email": "ann@test.com", "password": "wrong-password" });
    let response = post_json(app, "/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "invalid credentials");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_email_looks_like_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "ghost@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "invalid credentials");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_missing_password_is_unprocessable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/login", json!({ "email": "ann@test.com" })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "password is empty");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_issues_a_new_pair(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "ann@test.com").await;
    let first = login(app.clone(), "ann@test.com").await;

    let body = json!({ "refreshToken": first["refreshToken"] });
    let response = post_json(app.clone(), "/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let access = json["accessToken"].as_str().unwrap();
    let profile = get_auth(app, "/user", access).await;
    assert_eq!(profile.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rejects_access_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token_for(app.clone(), "ann@test.com").await;

    let response = post_json(app, "/refresh", json!({ "refreshToken": token })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Authentication guard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_unauthorised(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/user").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "not authorised");
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_is_unauthorised(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/user", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_profile(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token_for(app.clone(), "ann@test.com").await;

    let response = get_auth(app, "/user", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["email"], "ann@test.com");
    assert!(json["createdAt"].is_string());
    assert!(json.get("passwordHash").is_none());
    assert!(json.get("firstName").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token_for(app.clone(), "ann@test.com").await;

    let body = json!({ "email": "ann.new@test.com", "firstName": "Ann", "lastName": "" });
    let response = put_json_auth(app.clone(), "/user", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["email"], "ann.new@test.com");
    assert_eq!(json["firstName"], "Ann");
    assert_eq!(json["lastName"], "");
    assert!(json["updatedAt"].is_string());

    let profile = body_json(get_auth(app, "/user", &token).await).await;
    assert_eq!(profile["email"], "ann.new@test.com");
    assert_eq!(profile["firstName"], "Ann");
    assert!(profile.get("lastName").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_requires_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token_for(app.clone(), "ann@test.com").await;

    let response = put_json_auth(app, "/user", json!({ "firstName": "Ann" }), &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "email is empty");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_to_taken_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "taken@test.com").await;
    let token = access_token_for(app.clone(), "ann@test.com").await;

    let response = put_json_auth(app, "/user", json!({ "email": "taken@test.com" }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "user with this email exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_keeping_own_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token_for(app.clone(), "ann@test.com").await;

    let body = json!({ "email": "ann@test.com", "lastName": "Lee" });
    let response = put_json_auth(app, "/user", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["lastName"], "Lee");
}
