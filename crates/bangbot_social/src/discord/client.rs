//! Discord gateway client setup and lifecycle management.

use super::handler::BangbotHandler;
use crate::DiscordResult;
use serenity::Client;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

/// Gateway connection driving a [`BangbotHandler`].
///
/// Reconnection is left to Serenity's shard runners.
pub struct DiscordGateway {
    client: Client,
}

impl DiscordGateway {
    /// Build the Serenity client.
    ///
    /// # Errors
    /// Returns an error if the token is malformed or the client cannot be built.
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn new(token: &str, handler: BangbotHandler) -> DiscordResult<Self> {
        let intents = BangbotHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(token, intents)
            .event_handler(handler)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to build Serenity client"))?;

        info!("Serenity client built successfully");
        Ok(Self { client })
    }

    /// Run the event loop until `shutdown` is cancelled or the client fails.
    ///
    /// Cancellation shuts every shard down, which makes the client return.
    #[instrument(skip_all)]
    pub async fn run(mut self, shutdown: CancellationToken) -> DiscordResult<()> {
        let shard_manager = self.client.shard_manager.clone();
        let watcher = tokio::spawn(async move {
            shutdown.cancelled().await;
            info!("Shutting down Discord shards");
            shard_manager.shutdown_all().await;
        });

        info!("Starting Discord gateway");
        let result = self.client.start().await;
        watcher.abort();

        result.inspect_err(|e| error!(error = %e, "Discord client stopped with error"))?;

        info!("Discord gateway stopped");
        Ok(())
    }
}
