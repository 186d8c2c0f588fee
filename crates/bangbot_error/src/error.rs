//! Top-level error wrapper types.

use crate::{ConfigError, ServerError};
#[cfg(feature = "database")]
use crate::DatabaseError;

/// Every error a Bangbot crate can surface to the process boundary.
///
/// # Examples
///
/// ```
/// use bangbot_error::{BangbotError, ConfigError};
///
/// let err: BangbotError = ConfigError::new("missing token").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BangbotErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Process, gateway or listener error
    #[from(ServerError)]
    Server(ServerError),
}

/// Bangbot error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Bangbot Error: {}", _0)]
pub struct BangbotError(Box<BangbotErrorKind>);

impl BangbotError {
    /// Create a new error from a kind.
    pub fn new(kind: BangbotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BangbotErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to BangbotErrorKind
impl<T> From<T> for BangbotError
where
    T: Into<BangbotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Bangbot operations.
pub type BangbotResult<T> = std::result::Result<T, BangbotError>;
