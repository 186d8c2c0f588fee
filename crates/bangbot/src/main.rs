//! Bangbot binary.
//!
//! Reads settings from flags, the environment and an optional `.env` file,
//! then runs the bot until SIGINT or SIGTERM.

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use bangbot_server::{init_observability, launch, shutdown_signal};
    use cli::Cli;

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _guard = match init_observability(&cli.observability()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match cli.bot_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match launch(config, shutdown_signal()).await {
        Ok(()) => {
            tracing::info!("Bot stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Bot exited with error");
            ExitCode::FAILURE
        }
    }
}
