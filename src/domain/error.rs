use std::io;

use thiserror::Error;

/// Library-wide error type for tmplgate operations outside the render envelope.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file missing at the given path.
    #[error("Config file not found: {0}")]
    ConfigMissing(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Context file could not be parsed.
    #[error("Failed to parse context {path}: {details}")]
    ContextParse { path: String, details: String },

    /// Context file parsed to something other than a mapping.
    #[error("Context {0} must be a mapping at the top level")]
    ContextNotMapping(String),

    /// `--set key=value` override is malformed.
    #[error("Invalid override '{0}': expected key=value")]
    InvalidOverride(String),

    /// Envelope or context serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caller broke the render calling convention.
    #[error(transparent)]
    Contract(#[from] ContractViolation),

    /// Registry lookup miss.
    #[error(transparent)]
    UnknownEngine(#[from] UnknownEngine),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidConfig(_)
            | AppError::TomlParseError(_)
            | AppError::ContextParse { .. }
            | AppError::ContextNotMapping(_)
            | AppError::InvalidOverride(_)
            | AppError::Contract(_) => io::ErrorKind::InvalidInput,
            AppError::ConfigMissing(_) | AppError::UnknownEngine(_) => io::ErrorKind::NotFound,
            AppError::Serialization(_) => io::ErrorKind::InvalidData,
        }
    }
}

/// The caller handed `invoke` a context it must never receive.
///
/// Raised before any template is read or rendered. Never folded into an
/// [`Envelope`](crate::domain::Envelope).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("render context is missing required key '{0}'")]
    MissingContextKey(&'static str),
}

/// Registry lookup miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown template engine '{name}'. Available: {available}")]
pub struct UnknownEngine {
    pub name: String,
    pub available: String,
}
