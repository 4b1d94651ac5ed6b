use std::path::PathBuf;

use thiserror::Error;

/// Failure to install the CLI's log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level or an extra directive is not valid `EnvFilter` syntax.
    #[error("invalid log directive '{directive}': {message}")]
    InvalidDirective {
        /// The directive as given.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// The log directory could not be created.
    #[error("failed to create log directory {}: {source}", path.display())]
    LogDirectory {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
