//! Runtime configuration for the bot process.

use bangbot_error::ConfigError;
use derive_getters::Getters;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Port the health listener binds when none is configured.
pub const DEFAULT_HEALTH_PORT: u16 = 8089;

/// How long tasks may take to drain after shutdown is requested.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Validated settings needed to start the bot.
///
/// Construct with [`BotConfig::new`]; required values are checked there so the
/// rest of the process can assume they are present.
#[derive(Clone, Getters)]
pub struct BotConfig {
    /// Discord bot token
    discord_token: String,
    /// PostgreSQL connection string
    database_url: String,
    /// Port for the `/health` listener
    health_port: u16,
    /// Drain window for the gateway and health tasks
    shutdown_grace: Duration,
}

impl BotConfig {
    /// Validate raw settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the token or connection string is missing or
    /// blank.
    pub fn new(
        discord_token: Option<String>,
        database_url: Option<String>,
        health_port: u16,
    ) -> Result<Self, ConfigError> {
        let discord_token = required(discord_token, "DISCORD_BOT_TOKEN")?;
        let database_url = required(database_url, "DATABASE_CONNECTION")?;

        Ok(Self {
            discord_token,
            database_url,
            health_port,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        })
    }

    /// Override the shutdown drain window.
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Address the health listener binds: all interfaces on the health port.
    pub fn health_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.health_port))
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::new(format!("missing {} env var", name))),
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("discord_token", &"<redacted>")
            .field("database_url", &"<redacted>")
            .field("health_port", &self.health_port)
            .field("shutdown_grace", &self.shutdown_grace)
            .finish()
    }
}
