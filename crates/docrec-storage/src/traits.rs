//! Storage abstraction traits
//!
//! This module defines the staging and archive roles that storage backends implement.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A file written to the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Absolute (or configured-relative) location of the staged bytes
    pub path: PathBuf,
    /// Generated name, `{uuid}.{extension}`; never derived from the client's filename
    pub file_name: String,
    /// Number of bytes written
    pub size: u64,
}

impl StagedFile {
    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Local staging of incoming uploads.
///
/// Staging is the one mandatory stage: every later stage reads what was written here,
/// so implementations must either write the whole payload or fail.
#[async_trait]
pub trait StagingStore: Send + Sync {
    /// Write `data` under a freshly generated name and return where it landed.
    ///
    /// `suggested_filename` only contributes its extension.
    async fn save(&self, data: &[u8], suggested_filename: &str) -> StorageResult<StagedFile>;
}

/// Remote archival of staged files.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// Upload the staged file (re-read from disk) and return its locator,
    /// e.g. `gs://bucket/captures/{name}`.
    async fn archive(&self, staged: &StagedFile) -> StorageResult<String>;

    /// Backend name used in logs
    fn backend_name(&self) -> &'static str;
}
