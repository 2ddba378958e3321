use crate::keys::generate_staged_name;
use crate::traits::{StagedFile, StagingStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem staging implementation
#[derive(Clone, Debug)]
pub struct LocalStagingStore {
    base_path: PathBuf,
}

impl LocalStagingStore {
    /// Create a new LocalStagingStore instance
    ///
    /// # Arguments
    /// * `base_path` - Staging directory (e.g., "/tmp/docrec_uploads"); created if missing
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create staging directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStagingStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl StagingStore for LocalStagingStore {
    async fn save(&self, data: &[u8], suggested_filename: &str) -> StorageResult<StagedFile> {
        let file_name = generate_staged_name(suggested_filename);
        let path = self.base_path.join(&file_name);
        let start = std::time::Instant::now();

        // The directory may have been removed since startup.
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create staging directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let size = file.metadata().await?.len();
        if size != data.len() as u64 {
            return Err(StorageError::UploadFailed(format!(
                "Truncated write to {}: {} of {} bytes",
                path.display(),
                size,
                data.len()
            )));
        }

        tracing::info!(
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Staged upload"
        );

        Ok(StagedFile {
            path,
            file_name,
            size,
        })
    }
}
