use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{fallback, health};
use crate::infrastructure::config::Config;
use crate::infrastructure::trace::trace_id_middleware;

/// Build the application router. Every response passes through the trace id middleware.
pub fn create_app() -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .fallback(fallback::not_found)
        .layer(middleware::from_fn(trace_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(config: Arc<Config>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app();

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
