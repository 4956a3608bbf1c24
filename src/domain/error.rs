use std::io;

use thiserror::Error;

/// Library-wide error type for scrapesync operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    ConfigMissing(String),

    /// Config file already exists and would be overwritten.
    #[error("Config file already exists: {0} (use --force to overwrite)")]
    ConfigExists(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Working directory is not a git checkout.
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    /// Git execution failed.
    #[error("Git error running '{command}': {details}")]
    GitError { command: String, details: String },

    /// Run lock could not be acquired or released.
    #[error("Run lock error at {path}: {details}")]
    LockError { path: String, details: String },

    /// Input failed validation.
    #[error("{0}")]
    Validation(String),

    /// Report serialization failed.
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn git<C: Into<String>, D: ToString>(command: C, details: D) -> Self {
        AppError::GitError { command: command.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::TomlParseError(_)
            | AppError::Validation(_)
            | AppError::Serialization(_) => io::ErrorKind::InvalidInput,
            AppError::ConfigMissing(_) | AppError::NotARepository(_) => io::ErrorKind::NotFound,
            AppError::ConfigExists(_) => io::ErrorKind::AlreadyExists,
            AppError::GitError { .. } | AppError::LockError { .. } => io::ErrorKind::Other,
        }
    }
}
