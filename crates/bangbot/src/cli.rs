//! Command-line and environment settings.

use bangbot_error::ConfigError;
use bangbot_server::{BotConfig, DEFAULT_HEALTH_PORT, ObservabilityConfig};
use clap::{Parser, ValueEnum};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "bangbot")]
#[command(about = "Discord bot serving random snippets for !category commands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Discord bot token
    #[arg(long, env = "DISCORD_BOT_TOKEN", hide_env_values = true)]
    pub discord_bot_token: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_CONNECTION", hide_env_values = true)]
    pub database_connection: Option<String>,

    /// Port for the /health endpoint
    #[arg(long, env = "HEALTH_PORT", default_value_t = DEFAULT_HEALTH_PORT)]
    pub health_port: u16,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Fallback log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Logging settings derived from the flags.
    pub fn observability(&self) -> ObservabilityConfig {
        ObservabilityConfig::new("bangbot")
            .with_log_level(&self.log_level)
            .with_json_logs(self.log_format == LogFormat::Json)
    }

    /// Validated bot settings.
    pub fn bot_config(&self) -> Result<BotConfig, ConfigError> {
        BotConfig::new(
            self.discord_bot_token.clone(),
            self.database_connection.clone(),
            self.health_port,
        )
    }
}
