//! Structured logging setup for the bot process.
//!
//! Logs go to stdout through `tracing-subscriber`. `RUST_LOG` takes
//! precedence over the configured level; JSON output is meant for production
//! log collectors.

use bangbot_error::{BangbotResult, ServerError, ServerErrorKind};
use tracing_subscriber::{
    EnvFilter,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

/// Configuration for logging.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to the startup event
    service_name: String,
    /// Service version
    service_version: String,
    /// Log level filter used when `RUST_LOG` is unset (e.g. "info")
    log_level: String,
    /// Emit JSON lines instead of human-readable output
    json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "bangbot".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create a configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set the service version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    /// Set the fallback log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Toggle JSON output.
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Whether JSON output is enabled.
    pub fn json_logs(&self) -> bool {
        self.json_logs
    }

    /// Fallback log level.
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

/// Keeps logging alive; dropping it records the shutdown.
#[derive(Debug)]
#[must_use = "dropping the guard immediately logs shutdown"]
pub struct ObservabilityGuard {
    service_name: String,
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        shutdown_observability(&self.service_name);
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global subscriber
/// is already installed.
pub fn init_observability(config: &ObservabilityConfig) -> BangbotResult<ObservabilityGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            ServerError::new(ServerErrorKind::Observability(format!(
                "Invalid log filter '{}': {}",
                config.log_level, e
            )))
        })?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ServerError::new(ServerErrorKind::Observability(e.to_string())))?;

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        json = config.json_logs,
        "Logging initialized"
    );

    Ok(ObservabilityGuard {
        service_name: config.service_name.clone(),
    })
}

/// Record that logging is going away.
///
/// The fmt layer writes synchronously, so there is nothing to flush.
pub fn shutdown_observability(service_name: &str) {
    tracing::info!(service = %service_name, "Logging shut down");
}
