//! Platform-neutral views of inbound chat events.

/// Who sent an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAuthor {
    /// Platform user ID
    pub id: u64,
    /// Display name used in logs
    pub name: String,
    /// Whether the account is a bot (including this one)
    pub bot: bool,
}

impl EventAuthor {
    /// A human author.
    pub fn user(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bot: false,
        }
    }

    /// A bot author.
    pub fn bot(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bot: true,
        }
    }
}

/// A free-text message posted in a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Channel the message was posted in; replies go here
    pub channel_id: u64,
    /// Guild, when not a direct message
    pub guild_id: Option<u64>,
    /// Author, when the platform could identify one
    pub author: Option<EventAuthor>,
    /// Raw message body
    pub content: String,
}

impl IncomingMessage {
    /// Message from a human author in a guild-less channel.
    pub fn new(channel_id: u64, author: EventAuthor, content: impl Into<String>) -> Self {
        Self {
            channel_id,
            guild_id: None,
            author: Some(author),
            content: content.into(),
        }
    }
}

/// A slash-command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingInteraction {
    /// Name of the invoked command
    pub command_name: String,
    /// Value of the `command` option, if supplied
    pub category: Option<String>,
    /// Invoking user, when known
    pub user: Option<EventAuthor>,
    /// Channel the command was invoked from
    pub channel_id: u64,
    /// Guild, when not a direct message
    pub guild_id: Option<u64>,
}
