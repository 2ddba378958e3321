use crate::{ArchiveStore, ObjectStoreArchive, StorageError, StorageResult};
use docrec_core::{ArchiveProvider, Config};
use std::sync::Arc;

/// Create the archive backend described by configuration.
///
/// Returns `Ok(None)` when no bucket is configured: archival is then simply off.
pub fn create_archive_store(config: &Config) -> StorageResult<Option<Arc<dyn ArchiveStore>>> {
    let Some(bucket) = config.backends.archive_bucket.clone() else {
        return Ok(None);
    };

    let archive = match config.backends.archive_provider {
        ArchiveProvider::Gcs => ObjectStoreArchive::gcs(bucket)?,
        ArchiveProvider::S3 => {
            let region = config.backends.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            ObjectStoreArchive::s3(bucket, region, config.backends.s3_endpoint.clone())?
        }
    };

    Ok(Some(Arc::new(archive)))
}
