//! FounderStore port for persisting extracted profiles.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::founder::Founder;

/// Errors that can occur while persisting a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Permission denied
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// IO error
    #[error("io error: {0}")]
    Io(String),
    /// Profile could not be rendered as JSON
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl StorageError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Durable storage for finished profiles.
#[async_trait]
pub trait FounderStore: Send + Sync {
    /// Persist `founder`.
    ///
    /// `source_name` identifies the transcript the profile came from and is
    /// used when the profile carries no usable name. Returns where the
    /// profile was written.
    async fn save(&self, founder: &Founder, source_name: &str) -> Result<PathBuf, StorageError>;
}
