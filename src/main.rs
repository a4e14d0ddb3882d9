//! # Facebook Poster
//!
//! A Rust web service that formats marketplace listings into Facebook Page posts,
//! saves an HTML preview of each post, and publishes it through the Graph API.
//!
//! ## API Endpoints
//!
//! - `POST /api/facebook/post`: Formats, previews and publishes a listing (requires `X-Api-Key`)
//! - `GET /api/health`: Returns service health status

use facebook_poster::{create_router, AppState, ServiceConfig};
use log::info;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Main entry point for the facebook-poster web service.
///
/// Initializes logging, loads the configuration from the environment, and serves
/// the HTTP routes until Ctrl-C or SIGTERM is received.
///
/// # Logging
///
/// The application uses the `env_logger` crate. Log levels can be controlled via
/// the `RUST_LOG` environment variable.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 5500
/// FB_SERVICE_API_KEY=secret cargo run
///
/// # Run with debug logging
/// RUST_LOG=debug FB_SERVICE_API_KEY=secret cargo run
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize the logging system
    env_logger::init();

    let config = ServiceConfig::from_env()?;
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let state = AppState::new(config)?;

    let app = create_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    info!("Starting facebook-poster server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received, stopping server");
}
