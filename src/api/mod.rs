pub mod admin;
pub mod extract;
pub mod state;
pub mod waitlist;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    timeout::TimeoutLayer,
};
use std::time::Duration;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Health check
        .route("/api/health", get(health))

        // Signup endpoints
        .route("/api/waitlist", post(waitlist::submit))
        .route("/api/waitlist/count", get(waitlist::count))

        // Admin endpoints
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/signups", get(admin::list_signups))
        .route("/api/admin/export", get(admin::export_csv))

        // Add request timeout
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
