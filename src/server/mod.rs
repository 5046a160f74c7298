mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::locator::{LocationFinder, StoreClient};

pub fn build_router(store: Option<StoreClient>) -> Router {
    let state = Arc::new(AppState {
        finder: Mutex::new(LocationFinder::new(store)),
    });

    Router::new()
        .route("/api/geocode", get(handlers::geocode))
        .route("/api/search", get(handlers::search))
        .route("/api/nearby", get(handlers::nearby))
        .route(
            "/api/status",
            get(handlers::location_status).post(handlers::status),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, store: Option<StoreClient>) {
    let app = build_router(store);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  Whisker Atlas server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}
