//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use docrec_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docrec API",
        version = "0.1.0",
        description = "Document capture service: accepts an image upload, stages it locally, extracts its text and optionally archives it and records its metadata."
    ),
    paths(
        handlers::upload::upload_document,
        handlers::health::health_check,
    ),
    components(schemas(
        models::UploadResponse,
        error::ErrorResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "upload", description = "Document upload"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
