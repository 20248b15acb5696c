//! Shared fixtures for unit tests

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::db::{create_pool, migrations, seed};
use crate::http::{build_router, AppState};

/// Fresh in-memory database with the schema applied.
pub(crate) async fn migrated_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:")
        .await
        .expect("in-memory pool");
    migrations::run(&pool).await.expect("migrations");
    pool
}

/// In-memory database loaded with the sample fixture.
pub(crate) async fn seeded_pool() -> SqlitePool {
    let pool = migrated_pool().await;
    seed::seed(&pool).await.expect("seed");
    pool
}

/// Router over an empty schema, plus the pool for direct assertions.
pub(crate) async fn migrated_app() -> (Router, SqlitePool) {
    let pool = migrated_pool().await;
    (build_router(AppState::new(pool.clone())), pool)
}

/// Router over the sample fixture, plus the pool for direct assertions.
pub(crate) async fn seeded_app() -> (Router, SqlitePool) {
    let pool = seeded_pool().await;
    (build_router(AppState::new(pool.clone())), pool)
}

/// Response captured for assertions; `body` is `Null` when not JSON.
pub(crate) struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

pub(crate) async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("router is infallible");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        location,
        body,
    }
}

pub(crate) async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

/// POST an urlencoded form body.
pub(crate) async fn post_form(app: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("request");
    send(app, request).await
}
