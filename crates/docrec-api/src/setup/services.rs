//! Backend construction
//!
//! Every optional backend is built here, once, and injected into the pipeline. A backend
//! whose settings are absent is not configured; one whose client fails to build is logged
//! and also treated as not configured, so the service still starts.

use anyhow::{Context, Result};
use docrec_core::Config;
use docrec_db::{setup_pool, MetadataRepository, PgMetadataRepository};
use docrec_extraction::{GoogleVisionConfig, GoogleVisionExtractor, TextExtractor};
use docrec_processing::{Capability, UploadPipeline};
use docrec_storage::{create_archive_store, ArchiveStore, LocalStagingStore};
use std::sync::Arc;

/// Build the upload pipeline with every backend the configuration enables.
pub async fn build_pipeline(config: &Config) -> Result<UploadPipeline> {
    let staging = LocalStagingStore::new(config.upload_dir().clone())
        .await
        .context("Failed to prepare staging directory")?;

    let pipeline = UploadPipeline::new(Arc::new(staging))
        .with_extractor(setup_extractor(config))
        .with_archive(setup_archive(config))
        .with_metadata(setup_metadata(config).await);

    tracing::info!(
        upload_dir = %config.upload_dir().display(),
        extraction = pipeline.extraction_enabled(),
        archive = pipeline.archive_enabled(),
        metadata = pipeline.metadata_enabled(),
        "Upload pipeline ready"
    );

    Ok(pipeline)
}

fn setup_extractor(config: &Config) -> Capability<dyn TextExtractor> {
    let Some(api_key) = config.backends.google_vision_api_key.clone() else {
        tracing::info!("GOOGLE_VISION_API_KEY not set, text extraction disabled");
        return Capability::NotConfigured;
    };

    let vision_config = GoogleVisionConfig {
        api_key,
        endpoint: config.backends.google_vision_endpoint.clone(),
        timeout_secs: config.backends.google_vision_timeout_secs,
    };

    match GoogleVisionExtractor::new(vision_config) {
        Ok(extractor) => {
            tracing::info!(backend = extractor.name(), "Text extraction enabled");
            Capability::Configured(Arc::new(extractor))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Text extraction unavailable");
            Capability::NotConfigured
        }
    }
}

fn setup_archive(config: &Config) -> Capability<dyn ArchiveStore> {
    match create_archive_store(config) {
        Ok(Some(archive)) => {
            tracing::info!(
                backend = archive.backend_name(),
                bucket = config.backends.archive_bucket.as_deref().unwrap_or_default(),
                "Archive enabled"
            );
            Capability::Configured(archive)
        }
        Ok(None) => {
            tracing::info!("No archive bucket configured, archival disabled");
            Capability::NotConfigured
        }
        Err(e) => {
            tracing::warn!(error = %e, "Archive unavailable");
            Capability::NotConfigured
        }
    }
}

async fn setup_metadata(config: &Config) -> Capability<dyn MetadataRepository> {
    if config.backends.database_url.is_none() {
        tracing::info!("DATABASE_URL not set, metadata persistence disabled");
        return Capability::NotConfigured;
    }

    match setup_pool(config).await {
        Ok(pool) => Capability::Configured(Arc::new(PgMetadataRepository::new(pool))),
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "Metadata persistence unavailable");
            Capability::NotConfigured
        }
    }
}
