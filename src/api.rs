use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::fixtures;
use crate::model::token::TokenRecord;

#[derive(Debug, Clone)]
struct ApiState {
    latency: Duration,
}

/// Query parameters of `GET /api/tokens`. Both are accepted for
/// compatibility and do not narrow the response.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub tab: Option<String>,
    pub time: Option<String>,
}

pub fn router(latency: Duration) -> Router {
    Router::new()
        .route("/api/tokens", get(list_tokens))
        .route("/health", get(health))
        .with_state(ApiState { latency })
}

async fn list_tokens(
    State(state): State<ApiState>,
    Query(query): Query<ListingQuery>,
) -> Json<Vec<TokenRecord>> {
    tracing::debug!(tab = ?query.tab, time = ?query.time, "GET /api/tokens");
    tokio::time::sleep(state.latency).await;
    Json(fixtures::mock_tokens())
}

async fn health() -> &'static str {
    "ok"
}

pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind listing API on {}", addr))
}

/// Serve the listing API on an already bound listener until `shutdown`
/// flips to `true`.
pub async fn serve(
    listener: TcpListener,
    latency: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let local: SocketAddr = listener.local_addr()?;
    tracing::info!(addr = %local, latency_ms = latency.as_millis() as u64, "Listing API listening");
    axum::serve(listener, router(latency))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
        .context("listing API server failed")?;
    tracing::info!("Listing API stopped");
    Ok(())
}
