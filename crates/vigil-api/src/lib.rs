//! Vigil API /v1: REST endpoints over the compliance engine
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/compliance/check", post(handlers::compliance_check))
        .route("/v1/compliance/report", get(handlers::last_report))
        .route("/v1/probe/check", post(handlers::probe_check))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(addr: &str) {
    let app = create_app(AppState::new());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    tracing::info!("Vigil API listening on {}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
