//! HTTP surface of the relay.
//!
//! One analysis route (any method reaches the handler so non-POST requests
//! get the relay's own 405) plus a health check.

mod handler;
mod response;

pub use handler::parse_image_data_url;
pub use response::AnalyzeResponse;

use crate::config::ServerConfig;
use crate::relay::Relay;
use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Path of the health check.
pub const HEALTH_ROUTE: &str = "/api/health";

/// Build the router for a configured relay.
pub fn router(relay: Arc<Relay>, config: &ServerConfig) -> Router {
    Router::new()
        .route(&config.route, any(handler::analyze))
        .route(HEALTH_ROUTE, get(handler::health))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(relay)
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Relay listening on http://{addr}");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
