//! Local Filesystem Store - Implementation of FounderStore.
//!
//! Writes each profile as pretty-printed JSON into a single directory:
//!
//! ```text
//! {base_path}/
//! ├── jane_doe_20240301_142233.json
//! └── interview_07_20240302_090000.json
//! ```
//!
//! The file stem is the founder's name, lowercased with anything outside
//! `[a-z0-9_-]` replaced by `_`. A profile with no usable name falls back to
//! the transcript file's stem. The suffix is the profile's `last_updated`
//! time.
//!
//! Writes go to `{name}.json.tmp`, are synced, then renamed into place, so a
//! crash never leaves a truncated profile behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::founder::Founder;
use crate::ports::{FounderStore, StorageError};

const FALLBACK_STEM: &str = "founder";

/// Local filesystem storage for extracted profiles.
#[derive(Debug, Clone)]
pub struct LocalFounderStore {
    base_path: PathBuf,
}

impl LocalFounderStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File name for `founder`, e.g. `jane_doe_20240301_142233.json`.
    pub fn file_name(founder: &Founder, source_name: &str) -> String {
        let stem = Some(slugify(&founder.basic_info().name))
            .filter(|s| !s.is_empty())
            .or_else(|| {
                Path::new(source_name)
                    .file_stem()
                    .map(|s| slugify(&s.to_string_lossy()))
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| FALLBACK_STEM.to_string());

        format!("{}_{}.json", stem, founder.metadata().last_updated.file_stamp())
    }

    async fn ensure_base_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create output directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }
}

fn slugify(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl FounderStore for LocalFounderStore {
    async fn save(&self, founder: &Founder, source_name: &str) -> Result<PathBuf, StorageError> {
        let body = serde_json::to_string_pretty(founder)?;

        self.ensure_base_dir().await?;

        let final_path = self.base_path.join(Self::file_name(founder, source_name));
        let temp_path = final_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(body.as_bytes()).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        tracing::info!(path = %final_path.display(), "profile saved");
        Ok(final_path)
    }
}
