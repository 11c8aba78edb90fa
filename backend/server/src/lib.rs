//! Documentation of the gait report upload relay.
//!
//!
//!
//! # General Infrastructure
//! - User opens the page served by this server and picks four files
//! - Two PDF reports (pre and post) plus two CSV exports (pre and post)
//! - Page posts them as one multipart form to `/upload`
//! - Server stages the files, forwards them to the analysis backend and
//!   returns its JSON verbatim
//! - Page renders patient details and the temporal/kinematic tables
//!
//!
//!
//! # Failure Modes
//!
//! - Nothing attached: `400 {"error": "No files received"}`, backend untouched
//! - Unknown or repeated file field: `400 {"error": "Unexpected field: <name>"}`
//! - Backend unreachable, slow or unhappy: `500 {"error": "Backend connection failed"}`
//!
//!
//!
//! # Notes
//!
//! ## Limits
//! The analysis backend has no declared timeout or size limit. We pick
//! 120 seconds per relay and 64 MiB per upload, both overridable.
//!
//! ## Temp Files
//! Uploads land in a per-request directory that is removed once the request
//! is done with it. See [`upload`].
//!
//!
//!
//! # Setup
//!
//! Run with defaults (port 3000, backend on `127.0.0.1:8000`).
//! ```sh
//! RUST_LOG=info cargo run -p gait-backend
//! ```
//!
//! Point at another backend.
//! ```sh
//! BACKEND_URL=http://analysis:8000/upload cargo run -p gait-backend
//! ```
//!
//! Environment
//! - `RUST_PORT`: listening port, default `3000`
//! - `BACKEND_URL`: downstream upload endpoint
//! - `BACKEND_TIMEOUT_SECS`: downstream timeout, default `120`
//! - `MAX_UPLOAD_MB`: request body limit, default `64`
//! - `STATIC_DIR`: page assets, default `public`
//! - `UPLOAD_DIR`: staging root, default system temp dir
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod relay;
pub mod routes;
pub mod state;
pub mod upload;

use config::Config;
use error::StartupError;
use routes::upload_handler;
use state::AppState;

pub async fn start_server() -> Result<(), StartupError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}, relaying to {}", state.config.backend_url);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/upload", post(upload_handler))
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
}
