use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{SNIPPET_CONTINUATION, SNIPPET_MAX_CHARS};

/// Everything known about one upload.
///
/// Built once per request after the file has been staged, then filled in by each
/// optional stage. `created_at` is stamped at construction and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub original_filename: String,
    pub staged_path: String,
    pub archive_locator: Option<String>,
    pub extracted_text: String,
    created_at: DateTime<Utc>,
    pub record_id: Option<String>,
}

impl UploadRecord {
    pub fn new(original_filename: impl Into<String>, staged_path: impl Into<String>) -> Self {
        Self {
            original_filename: original_filename.into(),
            staged_path: staged_path.into(),
            archive_locator: None,
            extracted_text: String::new(),
            created_at: Utc::now(),
            record_id: None,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Summary handed back to the caller. The stored record keeps the full text.
    pub fn to_response(&self) -> UploadResponse {
        UploadResponse {
            id: self.record_id.clone(),
            filename: self.original_filename.clone(),
            archive_locator: self.archive_locator.clone(),
            text_snippet: text_snippet(&self.extracted_text),
            created_at: self.created_at,
        }
    }
}

/// Upload summary returned by `POST /upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Metadata record id, absent when metadata was not persisted
    pub id: Option<String>,
    /// Filename as sent by the client
    pub filename: String,
    /// Remote location of the archived copy, e.g. `gs://bucket/captures/<name>.png`
    pub archive_locator: Option<String>,
    /// First 600 characters of the extracted text
    pub text_snippet: String,
    pub created_at: DateTime<Utc>,
}

/// Shape extracted text into a caller-facing preview.
///
/// Text up to [`SNIPPET_MAX_CHARS`] characters is returned verbatim; longer text is cut
/// at that many characters and suffixed with [`SNIPPET_CONTINUATION`].
pub fn text_snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], SNIPPET_CONTINUATION),
        None => text.to_string(),
    }
}
