use async_trait::async_trait;
use thiserror::Error;

/// Why an extraction attempt produced no usable answer
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The service answered but reported an error for this image
    #[error("Extraction service error {code:?}: {message}")]
    Service { code: Option<i32>, message: String },

    /// The request never produced a usable response (network, TLS, timeout, HTTP status)
    #[error("Extraction transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Invalid extraction response: {0}")]
    InvalidResponse(String),
}

/// Text extraction from image bytes
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Backend name used in logs
    fn name(&self) -> &str;

    /// Full recognized text of the image, or an empty string if there is none.
    async fn extract_text(&self, data: &[u8]) -> Result<String, ExtractionError>;
}
