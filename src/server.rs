//! HTTP surface: `/stocks` and `/health`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use common::Error;
use ticker_service::StockService;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the router with all routes.
pub fn build_app(service: Arc<StockService>) -> Router {
    Router::new()
        .route("/stocks", get(get_stocks))
        .route("/health", get(health))
        .with_state(service)
}

async fn get_stocks(State(service): State<Arc<StockService>>) -> Response {
    match service.get_stock_data().await {
        Ok(series) => (StatusCode::OK, Json(series.as_ref())).into_response(),
        Err(e) => {
            error!("Error getting stock data: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Serve until `shutdown` turns true or its sender drops.
pub async fn serve(
    service: Arc<StockService>,
    port: u16,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Listening on http://{}", addr);

    let shutdown_signal = async move {
        // A dropped sender also means shutdown.
        let _ = shutdown.wait_for(|stop| *stop).await;
        info!("Stopping HTTP server...");
    };

    axum::serve(listener, build_app(service))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| Error::Server(e.to_string()))
}
