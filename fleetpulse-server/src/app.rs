//! Axum application builder.
//!
//! Routes:
//! - `GET /` - dashboard page
//! - `GET /api/fleet-data` - one tick plus the opportunity score
//! - `GET /health` - liveness probe

use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::routes::{dashboard, fleet, health};
use crate::service::FleetService;
use crate::state::ServerState;

/// Create the Axum application with all routes.
pub fn create_app(state: ServerState) -> Router {
    // the dashboard may be served from another origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/", get(dashboard::index))
        .route("/api/fleet-data", get(fleet::fleet_data))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `server` and serve `service` until the process is stopped.
pub async fn serve(server: &ServerConfig, service: FleetService) -> std::io::Result<()> {
    let addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "fleetpulse listening");
    axum::serve(listener, create_app(ServerState::new(service))).await
}
