#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use pdfgen_api::auth::jwt::JwtConfig;
use pdfgen_api::config::{RendererConfig, ServerConfig};
use pdfgen_api::router::build_app_router;
use pdfgen_api::state::AppState;
use pdfgen_core::minify::HtmlMinifier;
use pdfgen_core::pdf::{PdfRenderer, RenderError};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Prefix the fake renderer puts in front of the HTML it receives.
pub const FAKE_PDF_PREFIX: &str = "%PDF-fake\n";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_hours: 168,
        },
        password_pepper: "test-pepper".to_string(),
        renderer: RendererConfig {
            binary: "wkhtmltopdf".to_string(),
            timeout_secs: 60,
        },
        db_connect_attempts: 1,
    }
}

/// Renderer that returns the bound HTML behind a fixed prefix, so tests can
/// assert on what would have been rendered.
pub struct EchoRenderer;

#[async_trait]
impl PdfRenderer for EchoRenderer {
    async fn render(&self, html: String) -> Result<Vec<u8>, RenderError> {
        Ok(format!("{FAKE_PDF_PREFIX}{html}").into_bytes())
    }
}

/// Renderer that always fails.
pub struct BrokenRenderer;

#[async_trait]
impl PdfRenderer for BrokenRenderer {
    async fn render(&self, _html: String) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Failed {
            code: 1,
            stderr: "boom".to_string(),
        })
    }
}

/// Build the full application router (same middleware stack as production)
/// backed by `pool` and the [`EchoRenderer`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_renderer(pool, Arc::new(EchoRenderer))
}

pub fn build_test_app_with_renderer(pool: PgPool, renderer: Arc<dyn PdfRenderer>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        minifier: Arc::new(HtmlMinifier::new()),
        renderer,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw, non-JSON body with an auth header.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Register `email` through the API and return its user id.
pub async fn register(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"]
        .as_str()
        .expect("register should return an id")
        .to_string()
}

/// Log in through the API and return the full login response.
pub async fn login(app: Router, email: &str) -> Value {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Register and log in, returning the access token.
pub async fn access_token_for(app: Router, email: &str) -> String {
    register(app.clone(), email).await;
    login(app, email).await["accessToken"]
        .as_str()
        .expect("login should return an access token")
        .to_string()
}

// ---------------------------------------------------------------------------
// Design helpers
// ---------------------------------------------------------------------------

pub const INVOICE_HTML: &str = "<!DOCTYPE html>
<html>
  <head>
    <title>Invoice</title>
  </head>
  <body>
    <h1>{{.amount}}</h1>
    <p>{{.currency}}</p>
  </body>
</html>";

pub fn encode(html: &str) -> String {
    STANDARD.encode(html)
}

/// Create a design through the API and return its id.
pub async fn create_design(app: Router, token: &str, name: &str, fields: Option<Value>) -> String {
    let mut body = serde_json::json!({ "name": name, "design": encode(INVOICE_HTML) });
    if let Some(fields) = fields {
        body["fields"] = fields;
    }
    let response = post_json_auth(app, "/design", body, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"]
        .as_str()
        .expect("create should return an id")
        .to_string()
}
