//! Platform-agnostic command dispatcher.
//!
//! Both entry points normalise the event into a category and resolve it
//! through the injected [`ContentService`]. They differ only in transport and
//! in the free-text path's `help` / `list` listing.

use crate::{
    EventAuthor, IncomingInteraction, IncomingMessage, InteractionResponder, MessageSink,
};
use bangbot_interface::ContentService;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Name of the registered slash command.
pub const COMMAND_NAME: &str = "command";

/// Name of the slash command's single required string option.
pub const OPTION_NAME: &str = "command";

/// Reserved free-text words that print the category listing.
pub const HELP_COMMANDS: [&str; 2] = ["help", "list"];

const BANG_PREFIX: char = '!';

/// Category named by a free-text message, if it is a bang command.
///
/// The body is trimmed first; everything after the leading `!` is the
/// category, taken verbatim.
///
/// # Example
/// ```
/// use bangbot_social::parse_bang_command;
///
/// assert_eq!(parse_bang_command("  !cats "), Some("cats"));
/// assert_eq!(parse_bang_command("cats"), None);
/// ```
pub fn parse_bang_command(content: &str) -> Option<&str> {
    content.trim().strip_prefix(BANG_PREFIX)
}

/// Render the `!help` listing from `(category, entry count)` pairs.
///
/// Returns `None` when there is nothing to list.
pub fn format_listing(categories: &[(String, usize)]) -> Option<String> {
    if categories.is_empty() {
        return None;
    }

    let mut message = String::from("Available commands:\n");
    for (category, count) in categories {
        message.push_str(&format!("• `!{}` ({} entries)\n", category, count));
    }
    Some(message)
}

/// What the free-text path decided to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageReply {
    /// A resolved entry for `category`.
    Content {
        /// Requested category
        category: String,
        /// Resolved entry
        text: String,
    },
    /// The category exists but resolution came back empty.
    NoContent {
        /// Requested category
        category: String,
    },
    /// The `help` / `list` listing.
    Listing {
        /// Reserved word the user typed
        command: String,
        /// Rendered listing
        text: String,
    },
    /// `help` / `list` with no categories stored at all.
    NoCommands {
        /// Reserved word the user typed
        command: String,
    },
}

impl MessageReply {
    /// Text posted to the channel.
    pub fn text(&self) -> String {
        match self {
            Self::Content { text, .. } => text.clone(),
            Self::NoContent { category } => format!("no content available for `!{}`", category),
            Self::Listing { text, .. } => text.clone(),
            Self::NoCommands { .. } => "no commands available".to_string(),
        }
    }

    /// Word after the `!`, used in logs and in the follow-up error message.
    pub fn command(&self) -> &str {
        match self {
            Self::Content { category, .. } | Self::NoContent { category } => category,
            Self::Listing { command, .. } | Self::NoCommands { command } => command,
        }
    }
}

/// Routes chat events to a content provider.
///
/// Cheap to clone; holds no per-call state, so one instance serves every
/// concurrently dispatched event.
#[derive(Clone)]
pub struct CommandDispatcher {
    content: Arc<dyn ContentService>,
}

impl CommandDispatcher {
    /// Create a dispatcher over any content provider.
    pub fn new(content: Arc<dyn ContentService>) -> Self {
        Self { content }
    }

    /// Decide the reply to a free-text message without sending anything.
    ///
    /// Returns `None` for events that must stay silent: non-commands, bot or
    /// anonymous authors, and unknown bang commands.
    pub async fn resolve_message(&self, message: &IncomingMessage) -> Option<MessageReply> {
        let author = human_author(message.author.as_ref())?;
        let category = parse_bang_command(&message.content)?;

        info!(
            category,
            user = %author.name,
            user_id = author.id,
            channel_id = message.channel_id,
            guild_id = ?message.guild_id,
            "Command received"
        );

        if self.content.has_category(category).await {
            let text = self.content.random_content(category).await;
            if text.is_empty() {
                warn!(category, user = %author.name, "No content available for command");
                return Some(MessageReply::NoContent {
                    category: category.to_string(),
                });
            }
            return Some(MessageReply::Content {
                category: category.to_string(),
                text,
            });
        }

        if HELP_COMMANDS.contains(&category) {
            info!(user = %author.name, user_id = author.id, "Help command requested");
            return Some(self.listing(category).await);
        }

        info!(
            category,
            user = %author.name,
            user_id = author.id,
            "Unknown command received"
        );
        None
    }

    /// Handle a free-text message end to end.
    ///
    /// A failed send is logged and followed by a best-effort error message;
    /// the follow-up's own failure is only logged.
    #[instrument(skip_all, fields(channel_id = message.channel_id))]
    pub async fn handle_message<S>(&self, sink: &S, message: &IncomingMessage)
    where
        S: MessageSink + ?Sized,
    {
        debug!(content = %message.content.trim(), "Message received");

        let started = Instant::now();
        let Some(reply) = self.resolve_message(message).await else {
            return;
        };

        match sink.send_message(message.channel_id, &reply.text()).await {
            Ok(()) => info!(
                command = reply.command(),
                duration_ms = started.elapsed().as_millis() as u64,
                "Reply sent successfully"
            ),
            Err(e) => {
                error!(
                    command = reply.command(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "Failed to send reply"
                );
                let notice = format!("failed to send content for `!{}`: {}", reply.command(), e);
                if let Err(e) = sink.send_message(message.channel_id, &notice).await {
                    error!(error = %e, "Failed to send error notice");
                }
            }
        }
    }

    /// Decide the single response to a slash-command invocation.
    pub async fn resolve_interaction(&self, category: &str) -> String {
        if !self.content.has_category(category).await {
            let available = self.content.available_categories().await;
            warn!(
                category,
                available_categories = ?available,
                "Invalid category requested"
            );
            return format!(
                "Category '{}' not found. Available categories: {}",
                category,
                available.join(", ")
            );
        }

        let content = self.content.random_content(category).await;
        if content.is_empty() {
            warn!(category, "No content available for command");
            return format!("No content available for `{}`", category);
        }
        content
    }

    /// Handle a slash-command invocation end to end.
    ///
    /// Sends exactly one response for the `command` command and nothing for
    /// any other command or for bot / anonymous users. A failed response is
    /// logged and not retried.
    #[instrument(skip_all, fields(channel_id = interaction.channel_id))]
    pub async fn handle_interaction<R>(&self, responder: &R, interaction: &IncomingInteraction)
    where
        R: InteractionResponder + ?Sized,
    {
        if interaction.command_name != COMMAND_NAME {
            debug!(command = %interaction.command_name, "Ignoring unrelated interaction");
            return;
        }
        let Some(user) = human_author(interaction.user.as_ref()) else {
            return;
        };

        let started = Instant::now();
        let category = interaction.category.as_deref().unwrap_or_default();

        info!(
            command = COMMAND_NAME,
            category,
            user = %user.name,
            user_id = user.id,
            channel_id = interaction.channel_id,
            guild_id = ?interaction.guild_id,
            "Slash command received"
        );

        let reply = self.resolve_interaction(category).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match responder.respond(&reply).await {
            Ok(()) => info!(
                category,
                user = %user.name,
                user_id = user.id,
                duration_ms,
                "Content sent successfully via slash command"
            ),
            Err(e) => error!(
                category,
                user = %user.name,
                duration_ms,
                error = %e,
                "Failed to send content"
            ),
        }
    }

    async fn listing(&self, command: &str) -> MessageReply {
        let categories = self.content.available_categories().await;
        if categories.is_empty() {
            warn!("No categories available for help");
            return MessageReply::NoCommands {
                command: command.to_string(),
            };
        }

        let mut counted = Vec::with_capacity(categories.len());
        for category in categories {
            let count = self.content.content_count(&category).await;
            counted.push((category, count));
        }

        info!(categories_count = counted.len(), "Help response prepared");
        match format_listing(&counted) {
            Some(text) => MessageReply::Listing {
                command: command.to_string(),
                text,
            },
            None => MessageReply::NoCommands {
                command: command.to_string(),
            },
        }
    }
}

/// The author, unless missing or a bot.
fn human_author(author: Option<&EventAuthor>) -> Option<&EventAuthor> {
    author.filter(|author| !author.bot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bang_command_trims_and_strips_prefix() {
        assert_eq!(parse_bang_command("!cats"), Some("cats"));
        assert_eq!(parse_bang_command("\n\t!dogs  "), Some("dogs"));
        assert_eq!(parse_bang_command("!"), Some(""));
        assert_eq!(parse_bang_command("hello !cats"), None);
        assert_eq!(parse_bang_command(""), None);
    }

    #[test]
    fn test_format_listing_one_line_per_category() {
        let listing = format_listing(&[("cats".to_string(), 2), ("dogs".to_string(), 1)])
            .expect("non-empty listing");
        assert_eq!(
            listing,
            "Available commands:\n• `!cats` (2 entries)\n• `!dogs` (1 entries)\n"
        );
        assert!(format_listing(&[]).is_none());
    }

    #[test]
    fn test_reply_text() {
        let reply = MessageReply::NoContent {
            category: "cats".to_string(),
        };
        assert_eq!(reply.text(), "no content available for `!cats`");

        let empty = MessageReply::NoCommands {
            command: "list".to_string(),
        };
        assert_eq!(empty.text(), "no commands available");
        assert_eq!(empty.command(), "list");
    }
}
