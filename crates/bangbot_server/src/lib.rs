//! Process wiring for Bangbot.
//!
//! [`launch`] performs the sequential start-up (store, dispatcher, gateway,
//! health listener) and hands over to [`BotServer`], which runs the gateway
//! and `/health` concurrently and shuts them down in order.

#![warn(missing_docs)]

mod config;
mod health;
mod lifecycle;
mod observability;

pub use config::{BotConfig, DEFAULT_HEALTH_PORT, DEFAULT_SHUTDOWN_GRACE};
pub use health::{
    DEFAULT_LIVENESS_TIMEOUT, DatabaseHealth, HEALTH_REQUEST_TIMEOUT, HealthReport, HealthState,
    bind_health, health_router, serve_health,
};
pub use lifecycle::{BotServer, Closeable, Gateway, Lifecycle, LifecycleState, shutdown_signal};
pub use observability::{
    ObservabilityConfig, ObservabilityGuard, init_observability, shutdown_observability,
};

use bangbot_database::ContentStore;
use bangbot_error::{BangbotResult, ServerError, ServerErrorKind};
use bangbot_interface::ContentService;
use bangbot_social::{BangbotHandler, CommandDispatcher, DiscordGateway};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Start the bot and run it until `shutdown` resolves.
///
/// Any failure before the bot is running aborts start-up; a store that was
/// already connected is closed first.
///
/// # Errors
///
/// Returns an error if the store, gateway or health listener cannot be set up,
/// or if the gateway or health listener fails while running.
#[instrument(skip_all, fields(health_port = *config.health_port()))]
pub async fn launch<F>(config: BotConfig, shutdown: F) -> BangbotResult<()>
where
    F: Future<Output = ()> + Send,
{
    let lifecycle = Lifecycle::new();
    info!(state = %lifecycle.state(), "Starting bangbot");

    let store = Arc::new(ContentStore::connect(config.database_url()).await.inspect_err(
        |e| error!(error = %e, "Failed to initialize content store"),
    )?);

    let dispatcher = CommandDispatcher::new(store.clone());
    let categories = store.available_categories().await;
    info!(categories = categories.len(), "Loaded categories for slash command");

    let handler = BangbotHandler::new(dispatcher, categories);
    let gateway = match DiscordGateway::new(config.discord_token(), handler).await {
        Ok(gateway) => gateway,
        Err(e) => {
            error!(error = %e, "Failed to create Discord session");
            store.close();
            return Err(ServerError::new(ServerErrorKind::Gateway(e.to_string())).into());
        }
    };

    let listener = match bind_health(config.health_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "Failed to bind health listener");
            store.close();
            return Err(e);
        }
    };

    let router = health_router(HealthState::new(store.clone()));

    BotServer::new(lifecycle, Box::new(gateway), store, router, listener)
        .with_shutdown_grace(*config.shutdown_grace())
        .run_until(shutdown)
        .await
}
