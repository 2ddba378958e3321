//! Upload pipeline: validate → stage → extract → archive → persist.
//!
//! Only validation and staging can fail the request. Extraction, archival and persistence
//! are optional stages: when their backend is missing they are skipped, and when it fails the
//! failure is logged and the response simply lacks that stage's output.

use std::sync::Arc;

use docrec_core::{UploadRecord, UploadResponse};
use docrec_db::MetadataRepository;
use docrec_extraction::TextExtractor;
use docrec_storage::{ArchiveStore, StagingStore};

use super::types::{IncomingFile, UploadError};
use crate::capability::Capability;

/// Runs one upload through every stage, strictly in sequence.
#[derive(Clone)]
pub struct UploadPipeline {
    staging: Arc<dyn StagingStore>,
    extractor: Capability<dyn TextExtractor>,
    archive: Capability<dyn ArchiveStore>,
    metadata: Capability<dyn MetadataRepository>,
}

impl UploadPipeline {
    /// Pipeline with staging only; every optional stage starts out not configured.
    pub fn new(staging: Arc<dyn StagingStore>) -> Self {
        Self {
            staging,
            extractor: Capability::NotConfigured,
            archive: Capability::NotConfigured,
            metadata: Capability::NotConfigured,
        }
    }

    pub fn with_extractor(mut self, extractor: Capability<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_archive(mut self, archive: Capability<dyn ArchiveStore>) -> Self {
        self.archive = archive;
        self
    }

    pub fn with_metadata(mut self, metadata: Capability<dyn MetadataRepository>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn extraction_enabled(&self) -> bool {
        self.extractor.is_configured()
    }

    pub fn archive_enabled(&self) -> bool {
        self.archive.is_configured()
    }

    pub fn metadata_enabled(&self) -> bool {
        self.metadata.is_configured()
    }

    /// Process one upload and build the caller-facing summary.
    pub async fn process(&self, file: Option<IncomingFile>) -> Result<UploadResponse, UploadError> {
        let file = validate(file)?;
        let data: &[u8] = &file.data;

        let staged = self.staging.save(data, &file.filename).await.map_err(|e| {
            tracing::error!(
                error = %e,
                filename = %file.filename,
                "Staging failed, rejecting upload"
            );
            UploadError::Staging(e)
        })?;

        let mut record = UploadRecord::new(file.filename.clone(), staged.path_string());

        record.extracted_text = self
            .extractor
            .run("extraction", move |extractor| async move {
                extractor.extract_text(data).await
            })
            .await
            .into_option()
            .unwrap_or_default();

        let staged = &staged;
        record.archive_locator = self
            .archive
            .run("archive", move |archive| async move { archive.archive(staged).await })
            .await
            .into_option();

        let persisted = &record;
        record.record_id = self
            .metadata
            .run("metadata", move |metadata| async move {
                metadata.persist(persisted).await
            })
            .await
            .into_option();

        tracing::info!(
            filename = %record.original_filename,
            staged_path = %record.staged_path,
            size_bytes = staged.size,
            text_chars = record.extracted_text.chars().count(),
            archived = record.archive_locator.is_some(),
            record_id = record.record_id.as_deref().unwrap_or(""),
            "Upload processed"
        );

        Ok(record.to_response())
    }
}

fn validate(file: Option<IncomingFile>) -> Result<IncomingFile, UploadError> {
    let file = file.ok_or_else(|| UploadError::Validation("file missing".to_string()))?;
    if file.filename.is_empty() {
        return Err(UploadError::Validation("empty filename".to_string()));
    }
    Ok(file)
}
