//! Error types for registrar-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from registrar-extensions
    #[error(transparent)]
    Extensions(#[from] registrar_extensions::Error),

    /// Error from registrar-config
    #[error(transparent)]
    Config(#[from] registrar_config::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
