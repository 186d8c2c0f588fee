//! Serenity implementations of the outbound transport traits.

use crate::{DiscordError, DiscordErrorKind, DiscordResult, InteractionResponder, MessageSink};
use async_trait::async_trait;
use serenity::all::{
    ChannelId, CommandInteraction, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::http::Http;
use std::sync::Arc;

/// Posts channel messages through Serenity's HTTP client.
#[derive(Clone)]
pub struct HttpMessageSink {
    http: Arc<Http>,
}

impl HttpMessageSink {
    /// Wrap the HTTP client from an event context.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessageSink for HttpMessageSink {
    async fn send_message(&self, channel_id: u64, content: &str) -> DiscordResult<()> {
        ChannelId::new(channel_id)
            .say(&self.http, content)
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::MessageSendFailed(e.to_string())))?;
        Ok(())
    }
}

/// Responds to one slash-command interaction.
pub struct CommandResponder<'a> {
    http: Arc<Http>,
    interaction: &'a CommandInteraction,
}

impl<'a> CommandResponder<'a> {
    /// Responder for `interaction`.
    pub fn new(http: Arc<Http>, interaction: &'a CommandInteraction) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl InteractionResponder for CommandResponder<'_> {
    async fn respond(&self, content: &str) -> DiscordResult<()> {
        let message = CreateInteractionResponseMessage::new().content(content);
        self.interaction
            .create_response(&self.http, CreateInteractionResponse::Message(message))
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::InteractionFailed(e.to_string())))
    }
}
