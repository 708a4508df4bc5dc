use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use resale_waitlist::{
    analytics::NoopAnalytics,
    api::{create_router, AppState},
    config::Config,
    db,
};
use sqlx::{Pool, Sqlite};
use tower::util::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";

/// In-memory store with the schema applied. One connection only: each
/// `sqlite::memory:` connection is a separate database.
pub async fn create_test_pool() -> Pool<Sqlite> {
    let pool = db::create_pool("sqlite::memory:", 1, 1).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

pub async fn create_test_app() -> (Router, Pool<Sqlite>) {
    let pool = create_test_pool().await;
    let config = Config::from_lookup(|key| match key {
        "ADMIN_EMAIL" => Some(ADMIN_EMAIL.to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        _ => None,
    })
    .unwrap();

    let state = AppState::new(pool.clone(), Arc::new(config), Arc::new(NoopAnalytics));
    (create_router(state), pool)
}

pub async fn send(app: &Router, request: Request<Body>) -> (axum::http::StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, body)
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
