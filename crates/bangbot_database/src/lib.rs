//! PostgreSQL integration for Bangbot.
//!
//! This crate provides the Diesel schema for the `commands` table and
//! [`ContentStore`], the store-backed implementation of
//! [`ContentService`](bangbot_interface::ContentService) and
//! [`LivenessProbe`](bangbot_interface::LivenessProbe).
//!
//! # Example
//!
//! ```rust,ignore
//! use bangbot_database::ContentStore;
//! use bangbot_interface::ContentService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ContentStore::connect(&std::env::var("DATABASE_CONNECTION")?).await?;
//! let line = store.random_content("cats").await;
//! store.close();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod schema;
mod store;

pub use store::{ContentStore, PING_TIMEOUT, PgPool};

use bangbot_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
