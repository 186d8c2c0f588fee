//! Error types for the bot process: gateway, health listener and task supervision.

/// Error kinds for server operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Failed to bind the health listener
    #[display("Failed to bind {}: {}", addr, message)]
    Bind {
        /// Address that could not be bound
        addr: String,
        /// Underlying I/O error message
        message: String,
    },

    /// Health listener failed while serving
    #[display("Health server error: {}", _0)]
    Serve(String),

    /// Chat gateway failed to build or run
    #[display("Gateway error: {}", _0)]
    Gateway(String),

    /// A supervised task panicked or was cancelled unexpectedly
    #[display("Task failed: {}", _0)]
    Task(String),

    /// Logging could not be initialised
    #[display("Observability error: {}", _0)]
    Observability(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The error kind
    pub kind: ServerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
