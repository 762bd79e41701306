//! Axum HTTP front-end for the verification service.
//!
//! Both endpoints read the query string through [`RawQuery`] rather than a
//! deserialized map, so the callback handler can see fields in the order
//! they were sent.

use crate::config::VerimockConfig;
use crate::service::VerificationService;
use crate::VerimockError;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Shared application state.
pub type AppState = Arc<VerificationService>;

/// Render errors as `"<status> - <reason>"` plain-text bodies.
impl IntoResponse for VerimockError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            error!("Server error: {}", self);
        } else {
            debug!("Rejected request: {}", self);
        }

        (status, format!("{} - {}", status.as_u16(), self)).into_response()
    }
}

/// Build the router for a service, mounted at its configured paths.
pub fn router(service: AppState) -> Router {
    let callback_path = service.config().callback_path.clone();
    let hash_path = service.config().hash_path.clone();

    Router::new()
        .route(&callback_path, get(callback))
        .route(&hash_path, get(hash))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Callback endpoint: verdict codes, or an empty body for unknown URLs.
async fn callback(
    State(service): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<String, VerimockError> {
    let verdict = service.verify_callback(query.as_deref())?;
    Ok(verdict.unwrap_or_default().to_string())
}

/// Digest helper endpoint.
async fn hash(
    State(service): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<String, VerimockError> {
    service.compute_hash(query.as_deref())
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(config: VerimockConfig) -> Result<(), VerimockError> {
    let addr = config.listen_addr;
    let service = Arc::new(VerificationService::new(config)?);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| VerimockError::Io(format!("Failed to bind {}: {}", addr, e)))?;

    info!(
        callback = %service.config().callback_path,
        hash = %service.config().hash_path,
        verdicts = service.config().verdicts.len(),
        "Starting verification mock on {}",
        addr
    );

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| VerimockError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
