//! Test helpers: build AppState and router for integration tests.
//!
//! Backends are in-process: a temporary staging directory, an in-memory object store and
//! stub extraction/metadata services. No network or database is needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use docrec_api::setup::routes;
use docrec_api::state::AppState;
use docrec_core::{AppError, ArchiveProvider, Config, UploadRecord};
use docrec_db::MetadataRepository;
use docrec_extraction::{ExtractionError, TextExtractor};
use docrec_processing::{Capability, UploadPipeline};
use docrec_storage::{
    ArchiveStore, LocalStagingStore, ObjectStoreArchive, StagedFile, StorageError,
};
use object_store::memory::InMemory;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const INDEX_HTML: &str = "<html><body><form action=\"/upload\"></form></body></html>";

/// Test application: server plus the directories it owns.
pub struct TestApp {
    pub server: TestServer,
    pub staging_dir: TempDir,
    pub static_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn staged_file_count(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn test_config(
    staging_dir: &Path,
    static_dir: &Path,
    max_upload_mb: u32,
    environment: &str,
) -> Config {
    let staging_dir = staging_dir.to_string_lossy().to_string();
    let static_dir = static_dir.to_string_lossy().to_string();
    Config::from_lookup(|key| match key {
        "UPLOAD_DIR" => Some(staging_dir.clone()),
        "STATIC_DIR" => Some(static_dir.clone()),
        "MAX_UPLOAD_SIZE_MB" => Some(max_upload_mb.to_string()),
        "ENVIRONMENT" => Some(environment.to_string()),
        _ => None,
    })
    .unwrap()
}

/// Backends to wire into the pipeline under test.
#[derive(Default)]
pub struct Backends {
    pub extractor: Capability<dyn TextExtractor>,
    pub archive: Capability<dyn ArchiveStore>,
    pub metadata: Capability<dyn MetadataRepository>,
}

pub async fn setup_test_app(backends: Backends) -> TestApp {
    build_test_app(backends, 25, "development").await
}

pub async fn setup_test_app_with_limit(backends: Backends, max_upload_mb: u32) -> TestApp {
    build_test_app(backends, max_upload_mb, "development").await
}

pub async fn setup_production_test_app(backends: Backends) -> TestApp {
    build_test_app(backends, 25, "production").await
}

async fn build_test_app(backends: Backends, max_upload_mb: u32, environment: &str) -> TestApp {
    let staging_dir = tempfile::tempdir().unwrap();
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), INDEX_HTML).unwrap();

    let config = test_config(
        staging_dir.path(),
        static_dir.path(),
        max_upload_mb,
        environment,
    );
    let staging = LocalStagingStore::new(staging_dir.path()).await.unwrap();

    let pipeline = UploadPipeline::new(Arc::new(staging))
        .with_extractor(backends.extractor)
        .with_archive(backends.archive)
        .with_metadata(backends.metadata);

    let state = Arc::new(AppState::new(config.clone(), pipeline));
    let router = routes::setup_routes(&config, state).unwrap();

    TestApp {
        server: TestServer::new(router).unwrap(),
        staging_dir,
        static_dir,
    }
}

pub enum ExtractorBehavior {
    Text(String),
    ServiceError,
}

pub struct StubExtractor(pub ExtractorBehavior);

#[async_trait]
impl TextExtractor for StubExtractor {
    fn name(&self) -> &str {
        "stub"
    }

    async fn extract_text(&self, _data: &[u8]) -> Result<String, ExtractionError> {
        match &self.0 {
            ExtractorBehavior::Text(text) => Ok(text.clone()),
            ExtractorBehavior::ServiceError => Err(ExtractionError::Service {
                code: Some(3),
                message: "Bad image data.".to_string(),
            }),
        }
    }
}

pub fn extractor(behavior: ExtractorBehavior) -> Capability<dyn TextExtractor> {
    Capability::Configured(Arc::new(StubExtractor(behavior)))
}

pub fn memory_archive(bucket: &str) -> (Arc<InMemory>, Capability<dyn ArchiveStore>) {
    let store = Arc::new(InMemory::new());
    let archive = ObjectStoreArchive::new(store.clone(), ArchiveProvider::Gcs, bucket);
    (store, Capability::Configured(Arc::new(archive)))
}

pub struct FailingArchive;

#[async_trait]
impl ArchiveStore for FailingArchive {
    async fn archive(&self, _staged: &StagedFile) -> Result<String, StorageError> {
        Err(StorageError::UploadFailed("quota exceeded".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

#[derive(Default)]
pub struct MemoryMetadata {
    pub records: Mutex<Vec<UploadRecord>>,
}

#[async_trait]
impl MetadataRepository for MemoryMetadata {
    async fn persist(&self, record: &UploadRecord) -> Result<String, AppError> {
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(format!("doc-{}", records.len()))
    }
}

pub struct FailingMetadata;

#[async_trait]
impl MetadataRepository for FailingMetadata {
    async fn persist(&self, _record: &UploadRecord) -> Result<String, AppError> {
        Err(AppError::Internal("connection reset by peer".to_string()))
    }
}
