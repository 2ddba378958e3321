use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_upload;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use docrec_core::{AppError, UploadResponse};
use std::sync::Arc;

/// Accept one image, run it through the pipeline and summarize the result.
///
/// Extraction, archival and persistence failures never change the status: the matching
/// fields are simply absent or empty.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Upload accepted", body = UploadResponse),
        (status = 400, description = "File missing or filename empty", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Upload could not be staged", body = ErrorResponse)
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    accept_upload(&state, multipart)
        .await
        .map(|response| (StatusCode::CREATED, Json(response)))
        .map_err(|e| HttpAppError::new(e, state.config.is_production()))
}

async fn accept_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadResponse, AppError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Request is not multipart");
        AppError::InvalidInput("file missing".to_string())
    })?;

    let file = extract_upload(multipart).await?;
    Ok(state.pipeline.process(file).await?)
}
