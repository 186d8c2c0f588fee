//! Process lifecycle: run the gateway and health listener, then shut down in order.

use crate::health::serve_health;
use async_trait::async_trait;
use axum::Router;
use bangbot_database::ContentStore;
use bangbot_error::{BangbotError, BangbotResult, ServerError, ServerErrorKind};
use bangbot_social::DiscordGateway;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

/// Phases of the bot process, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum LifecycleState {
    /// Loading config and connecting dependencies
    Initializing,
    /// Gateway and health listener are serving
    Running,
    /// Draining tasks and releasing resources
    ShuttingDown,
    /// Everything released
    Stopped,
}

/// Publishes the current [`LifecycleState`] to any number of observers.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: Arc<watch::Sender<LifecycleState>>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Start in [`LifecycleState::Initializing`].
    pub fn new() -> Self {
        let (state, _) = watch::channel(LifecycleState::Initializing);
        Self {
            state: Arc::new(state),
        }
    }

    /// Move to `next` and notify observers.
    pub fn transition(&self, next: LifecycleState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            info!(from = %previous, to = %next, "Lifecycle transition");
        }
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// Receiver that sees every subsequent transition.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }
}

/// A long-running chat connection.
#[async_trait]
pub trait Gateway: Send {
    /// Process events until `shutdown` is cancelled or the connection fails.
    async fn run(self: Box<Self>, shutdown: CancellationToken) -> BangbotResult<()>;
}

#[async_trait]
impl Gateway for DiscordGateway {
    async fn run(self: Box<Self>, shutdown: CancellationToken) -> BangbotResult<()> {
        DiscordGateway::run(*self, shutdown)
            .await
            .map_err(|e| ServerError::new(ServerErrorKind::Gateway(e.to_string())).into())
    }
}

/// A resource released once at the very end of shutdown.
pub trait Closeable: Send + Sync {
    /// Release the resource. Must tolerate repeated calls.
    fn close(&self);
}

impl Closeable for ContentStore {
    fn close(&self) {
        ContentStore::close(self);
    }
}

/// Supervises the gateway and health tasks and owns shutdown ordering.
///
/// Shutdown begins on the external signal or when either task ends on its
/// own. Both tasks then get the grace period to drain before being aborted,
/// and the store is closed only after both have stopped.
pub struct BotServer {
    lifecycle: Lifecycle,
    gateway: Box<dyn Gateway>,
    store: Arc<dyn Closeable>,
    router: Router,
    listener: TcpListener,
    shutdown_grace: Duration,
}

impl BotServer {
    /// Assemble a server from already-initialised parts.
    pub fn new(
        lifecycle: Lifecycle,
        gateway: Box<dyn Gateway>,
        store: Arc<dyn Closeable>,
        router: Router,
        listener: TcpListener,
    ) -> Self {
        Self {
            lifecycle,
            gateway,
            store,
            router,
            listener,
            shutdown_grace: crate::DEFAULT_SHUTDOWN_GRACE,
        }
    }

    /// Override the drain window.
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Run until `signal` resolves or a task stops, then shut down.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the gateway or health task. The
    /// store is closed and the state reaches `Stopped` either way.
    #[instrument(skip_all)]
    pub async fn run_until<F>(self, signal: F) -> BangbotResult<()>
    where
        F: Future<Output = ()> + Send,
    {
        let Self {
            lifecycle,
            gateway,
            store,
            router,
            listener,
            shutdown_grace,
        } = self;

        let token = CancellationToken::new();
        let mut gateway_task = tokio::spawn(gateway.run(token.child_token()));
        let mut health_task = tokio::spawn(serve_health(listener, router, token.child_token()));

        lifecycle.transition(LifecycleState::Running);
        info!("Bot is running");

        let mut gateway_result = None;
        let mut health_result = None;

        tokio::select! {
            _ = signal => info!("Shutdown signal received"),
            joined = &mut gateway_task => {
                warn!("Gateway stopped unexpectedly");
                gateway_result = Some(flatten(joined, "gateway"));
            }
            joined = &mut health_task => {
                warn!("Health server stopped unexpectedly");
                health_result = Some(flatten(joined, "health server"));
            }
        }

        lifecycle.transition(LifecycleState::ShuttingDown);
        token.cancel();

        let gateway_result = match gateway_result {
            Some(result) => result,
            None => drain(gateway_task, shutdown_grace, "gateway").await,
        };
        let health_result = match health_result {
            Some(result) => result,
            None => drain(health_task, shutdown_grace, "health server").await,
        };

        store.close();
        lifecycle.transition(LifecycleState::Stopped);

        if let Err(e) = &gateway_result {
            error!(error = %e, "Gateway exited with error");
        }
        if let Err(e) = &health_result {
            error!(error = %e, "Health server exited with error");
        }

        gateway_result.and(health_result)
    }
}

/// Wait up to `grace` for `task`, aborting it on timeout.
async fn drain(
    mut task: JoinHandle<BangbotResult<()>>,
    grace: Duration,
    name: &str,
) -> BangbotResult<()> {
    match tokio::time::timeout(grace, &mut task).await {
        Ok(joined) => flatten(joined, name),
        Err(_) => {
            warn!(task = name, grace_ms = grace.as_millis() as u64, "Task did not stop in time, aborting");
            task.abort();
            Ok(())
        }
    }
}

fn flatten(
    joined: Result<BangbotResult<()>, tokio::task::JoinError>,
    name: &str,
) -> BangbotResult<()> {
    joined.map_err(|e| -> BangbotError {
        ServerError::new(ServerErrorKind::Task(format!("{} task failed: {}", name, e))).into()
    })?
}

/// Resolves on SIGINT or SIGTERM (ctrl-c only on non-unix platforms).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install ctrl-c handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
