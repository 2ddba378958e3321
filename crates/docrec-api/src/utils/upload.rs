//! Multipart request handling for uploads

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use docrec_core::AppError;
use docrec_processing::IncomingFile;

/// Name of the multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{}: {}", context, e.body_text()))
    } else {
        AppError::InvalidInput(format!("{}: {}", context, e.body_text()))
    }
}

/// Read the `file` field out of a multipart body.
///
/// Returns `Ok(None)` when the field is absent; a missing filename comes back as an empty
/// string so the pipeline can reject it. Other fields are drained and ignored.
pub async fn extract_upload(mut multipart: Multipart) -> Result<Option<IncomingFile>, AppError> {
    let mut upload: Option<IncomingFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        if upload.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().map(str::to_string).unwrap_or_default();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read file data", e))?;

        upload = Some(IncomingFile::new(filename, data));
    }

    Ok(upload)
}
