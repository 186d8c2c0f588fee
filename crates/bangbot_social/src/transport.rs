//! Outbound transport seams.
//!
//! The free-text path may send several messages per event; the slash path
//! gets exactly one response per interaction, which is why the two are
//! separate traits.

use crate::DiscordResult;
use async_trait::async_trait;

/// Posts plain-text messages to a channel.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Send `content` to `channel_id`.
    async fn send_message(&self, channel_id: u64, content: &str) -> DiscordResult<()>;
}

/// Sends the single initial response to one interaction.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Respond with `content`.
    async fn respond(&self, content: &str) -> DiscordResult<()>;
}
