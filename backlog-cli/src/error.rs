use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Library export could not be read
    #[error("Import error: {0}")]
    Import(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// No game matched the given name
    #[error("No game found matching '{0}'")]
    NotFound(String),

    /// Bad argument value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
