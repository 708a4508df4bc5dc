use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resale_waitlist::{
    analytics::TracingAnalytics,
    api::{create_router, AppState},
    config::Config,
    db,
    error::AppError,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,resale_waitlist=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting resale waitlist server v{}...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Arc::new(Config::from_env()?);
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(
        &config.database_url,
        config.db_max_connections,
        config.db_min_connections,
    )
    .await?;
    tracing::info!("Database connected: {}", config.database_url);

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    let state = AppState::new(pool, config.clone(), Arc::new(TracingAnalytics));
    let app = create_router(state);

    // Bind and serve
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("  POST /api/waitlist        - Join the waitlist");
    tracing::info!("  GET  /api/waitlist/count  - Total signups");
    tracing::info!("  POST /api/admin/login     - Check admin email");
    tracing::info!("  GET  /api/admin/signups   - List signups");
    tracing::info!("  GET  /api/admin/export    - Download signups as CSV");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
