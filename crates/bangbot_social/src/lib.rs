//! Command dispatch for Bangbot.
//!
//! Inbound chat events are normalised into a category string and resolved
//! through [`ContentService`](bangbot_interface::ContentService). Two entry
//! points share that logic:
//!
//! - free-text messages of the form `!category` (plus the `!help` / `!list`
//!   listing), handled by [`CommandDispatcher::handle_message`]
//! - the `/command` slash command, handled by
//!   [`CommandDispatcher::handle_interaction`]
//!
//! The dispatcher talks to the platform only through [`MessageSink`] and
//! [`InteractionResponder`], so it runs unchanged against test doubles. The
//! Serenity adapters live in the feature-gated `discord` module.

#![warn(missing_docs)]

mod dispatcher;
mod error;
mod events;
mod transport;

#[cfg(feature = "discord")]
mod discord;

pub use dispatcher::{
    COMMAND_NAME, CommandDispatcher, HELP_COMMANDS, MessageReply, OPTION_NAME, format_listing,
    parse_bang_command,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use events::{EventAuthor, IncomingInteraction, IncomingMessage};
pub use transport::{InteractionResponder, MessageSink};

#[cfg(feature = "discord")]
pub use discord::{
    BangbotHandler, CommandResponder, DiscordGateway, HttpMessageSink, MAX_COMMAND_CHOICES,
    category_command,
};
