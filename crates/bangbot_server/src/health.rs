//! HTTP health endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use bangbot_error::{BangbotResult, ServerError, ServerErrorKind};
use bangbot_interface::LivenessProbe;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Upper bound on a single health request.
pub const HEALTH_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest a single liveness check may run before counting as disconnected.
///
/// Must stay below [`HEALTH_REQUEST_TIMEOUT`] so slow checks still produce a
/// 503 report.
pub const DEFAULT_LIVENESS_TIMEOUT: Duration = Duration::from_secs(5);

/// State shared with the health handler.
#[derive(Clone)]
pub struct HealthState {
    probe: Arc<dyn LivenessProbe>,
    liveness_timeout: Duration,
}

impl HealthState {
    /// Wrap the probe consulted on every request.
    pub fn new(probe: Arc<dyn LivenessProbe>) -> Self {
        Self {
            probe,
            liveness_timeout: DEFAULT_LIVENESS_TIMEOUT,
        }
    }

    /// Override the liveness check deadline.
    pub fn with_liveness_timeout(mut self, timeout: Duration) -> Self {
        self.liveness_timeout = timeout;
        self
    }
}

/// Body of a `/health` response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthReport {
    /// `healthy` or `unhealthy`
    pub status: &'static str,
    /// RFC 3339 UTC timestamp of the check
    pub timestamp: String,
    /// Database reachability
    pub database: DatabaseHealth,
}

/// Database section of a [`HealthReport`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Whether the liveness ping succeeded
    pub connected: bool,
}

/// Creates the health router.
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .layer(TimeoutLayer::new(HEALTH_REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint: 200 when the probe succeeds, 503 otherwise.
async fn health_check(State(state): State<HealthState>) -> Response {
    let connected = match tokio::time::timeout(state.liveness_timeout, state.probe.ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(error = %e, "Database health check failed");
            false
        }
        Err(_) => {
            warn!(
                timeout_ms = state.liveness_timeout.as_millis() as u64,
                "Database health check timed out"
            );
            false
        }
    };

    let (code, status) = if connected {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let report = HealthReport {
        status,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        database: DatabaseHealth { connected },
    };

    (code, Json(report)).into_response()
}

/// Serve `router` on `listener` until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish after cancellation.
///
/// # Errors
///
/// Returns an error if the listener fails while serving.
pub async fn serve_health(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> BangbotResult<()> {
    let addr = listener
        .local_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    info!(addr = %addr, "Health check server started");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Health check server stopped");
    Ok(())
}

/// Bind the health listener.
///
/// # Errors
///
/// Returns an error if the address is already in use or not bindable.
pub async fn bind_health(addr: std::net::SocketAddr) -> BangbotResult<TcpListener> {
    TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.to_string(),
            message: e.to_string(),
        })
        .into()
    })
}
