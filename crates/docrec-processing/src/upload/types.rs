use bytes::Bytes;
use docrec_core::AppError;
use docrec_storage::StorageError;
use thiserror::Error;

/// A file as received from the client.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Filename supplied by the client, untrusted
    pub filename: String,
    pub data: Bytes,
}

impl IncomingFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Failures that abort an upload.
///
/// Optional stages never produce one of these; only input validation and staging can.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Validation(String),

    #[error("Staging failed: {0}")]
    Staging(#[from] StorageError),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Validation(msg) => AppError::InvalidInput(msg),
            UploadError::Staging(e) => AppError::Staging(e.to_string()),
        }
    }
}
