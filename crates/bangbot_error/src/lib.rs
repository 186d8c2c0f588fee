//! Error types for Bangbot.
//!
//! This crate provides the foundation error types used throughout the Bangbot workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use bangbot_error::{BangbotResult, ConfigError};
//!
//! fn load_token() -> BangbotResult<String> {
//!     Err(ConfigError::new("missing DISCORD_BOT_TOKEN env var"))?
//! }
//!
//! match load_token() {
//!     Ok(token) => println!("Got {} bytes", token.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod server;

pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{BangbotError, BangbotErrorKind, BangbotResult};
pub use server::{ServerError, ServerErrorKind};
