use thiserror::Error;

/// Process-level error for the AlphaScript Engine binaries
#[derive(Error, Debug)]
pub enum AppError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server startup and serving errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Logging initialisation errors
    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for AlphaScript operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Log an error with the context it occurred in
pub fn log_error(context: &str, error: &AppError) {
    tracing::error!(
        context = context,
        error = %error,
        "AlphaScript error occurred"
    );
}
