//! HTTP surface for the resolver.
//!
//! - `POST /api/resolve` resolve a pasted link
//! - `GET /api/share/:short_id` share lookup as JSON
//! - `GET /s/:short_id` minimal share page
//! - `GET /health` liveness

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result, ResultExt};
use crate::resolver::ResolverService;

pub mod routes;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub resolver: Arc<ResolverService>,
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/resolve", post(routes::resolve))
        .route("/api/share/:short_id", get(routes::share_json))
        .route("/s/:short_id", get(routes::share_page))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Start the HTTP server and run until Ctrl+C / SIGTERM
pub async fn serve(resolver: Arc<ResolverService>, bind: &str) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| Error::server(format!("invalid bind address {bind}: {e}")))?;

    let app = create_router(AppContext { resolver });

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(format!("binding {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
