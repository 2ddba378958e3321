use crate::keys::archive_key;
use crate::traits::{ArchiveStore, StagedFile, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use docrec_core::constants::ARCHIVE_CONTENT_TYPE;
use docrec_core::ArchiveProvider;
use object_store::aws::AmazonS3Builder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use std::sync::Arc;

/// Archive backed by any `object_store` implementation
///
/// Locators take the form `{scheme}://{bucket}/{key}`, e.g.
/// `gs://captures-prod/captures/4f1c....png`.
#[derive(Clone, Debug)]
pub struct ObjectStoreArchive {
    store: Arc<dyn ObjectStore>,
    provider: ArchiveProvider,
    bucket: String,
}

impl ObjectStoreArchive {
    /// Wrap an already built store.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        provider: ArchiveProvider,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            store,
            provider,
            bucket: bucket.into(),
        }
    }

    /// Google Cloud Storage, credentials from the environment
    /// (`GOOGLE_SERVICE_ACCOUNT`, `GOOGLE_APPLICATION_CREDENTIALS`, ...).
    pub fn gcs(bucket: String) -> StorageResult<Self> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket.clone())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(Arc::new(store), ArchiveProvider::Gcs, bucket))
    }

    /// S3 or an S3-compatible provider
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint (e.g., "http://localhost:9000" for MinIO)
    pub fn s3(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(Arc::new(store), ArchiveProvider::S3, bucket))
    }

    fn locator(&self, key: &str) -> String {
        format!("{}://{}/{}", self.provider.scheme(), self.bucket, key)
    }
}

#[async_trait]
impl ArchiveStore for ObjectStoreArchive {
    async fn archive(&self, staged: &StagedFile) -> StorageResult<String> {
        let key = archive_key(&staged.file_name);
        let location = Path::from(key.as_str());

        let data = tokio::fs::read(&staged.path).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to read staged file {}: {}",
                staged.path.display(),
                e
            ))
        })?;
        let size = data.len();

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(ARCHIVE_CONTENT_TYPE),
        );
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        self.store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), options)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "Archive upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        let locator = self.locator(&key);

        tracing::info!(
            locator = %locator,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Archived staged file"
        );

        Ok(locator)
    }

    fn backend_name(&self) -> &'static str {
        match self.provider {
            ArchiveProvider::Gcs => "gcs",
            ArchiveProvider::S3 => "s3",
        }
    }
}
