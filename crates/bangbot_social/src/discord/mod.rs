//! Discord integration for Bangbot.
//!
//! Thin Serenity adapters around the platform-agnostic dispatcher:
//!
//! - **client**: gateway client construction and cancellable run loop
//! - **handler**: `EventHandler` translating Serenity events into dispatcher calls
//! - **commands**: the `/command` slash command schema
//! - **transport**: `MessageSink` / `InteractionResponder` over Serenity's HTTP client
//!
//! Available with the `discord` feature (on by default).

mod client;
mod commands;
mod handler;
mod transport;

pub use client::DiscordGateway;
pub use commands::{MAX_COMMAND_CHOICES, category_command};
pub use handler::BangbotHandler;
pub use transport::{CommandResponder, HttpMessageSink};
