use thiserror::Error;

/// Process-level errors raised while starting or running the service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ServiceError {
    /// Whether the error was caused by missing or invalid configuration
    pub fn is_config(&self) -> bool {
        matches!(self, ServiceError::ConfigError(_))
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Log an error with the context it happened in
pub fn log_error(context: &str, error: &ServiceError) {
    tracing::error!(
        context = context,
        error = %error,
        "Service error occurred"
    );
}
