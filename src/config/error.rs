//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Attempt budget must be at least 1")]
    InvalidAttempts,

    #[error("Model name must not be empty")]
    EmptyModel,

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Chunk token budget must be greater than 0")]
    InvalidChunkBudget,

    #[error("Output directory must not be empty")]
    EmptyOutputDirectory,
}
