//! Discord-specific error types.

use derive_getters::Getters;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity client or gateway error.
    #[display("Serenity API error: {_0}")]
    SerenityError(String),

    /// Message failed to send.
    #[display("Message send failed: {_0}")]
    MessageSendFailed(String),

    /// Interaction response failed.
    #[display("Interaction failed: {_0}")]
    InteractionFailed(String),
}

/// Discord error with source location tracking.
///
/// Captures the error kind along with the file and line where the error occurred.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    #[getter(skip)]
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use bangbot_social::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::MessageSendFailed("429".into()));
    /// assert!(err.to_string().contains("429"));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get field `file` from instance of `DiscordError`.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

#[cfg(feature = "discord")]
impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        DiscordError::new(DiscordErrorKind::SerenityError(err.to_string()))
    }
}

#[cfg(all(test, feature = "discord"))]
mod tests {
    use super::*;

    fn fail() -> DiscordResult<()> {
        Err::<(), _>(serenity::Error::Other("gateway closed"))?;
        Ok(())
    }

    #[test]
    fn test_serenity_error_converts_with_question_mark() {
        let err = fail().expect_err("conversion yields an error");
        assert_eq!(
            *err.kind(),
            DiscordErrorKind::SerenityError("gateway closed".to_string())
        );
        assert!(err.file().ends_with("error.rs"));
    }
}
