//! Google Cloud Vision text detection

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::traits::{ExtractionError, TextExtractor};

const ANNOTATE_PATH: &str = "/v1/images:annotate";

/// Google Cloud Vision configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleVisionConfig {
    /// Google Cloud API key
    pub api_key: String,
    /// Base URL of the Vision API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://vision.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Debug for GoogleVisionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GoogleVisionConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// Full-document text detection through the Vision REST API
pub struct GoogleVisionExtractor {
    http_client: reqwest::Client,
    config: GoogleVisionConfig,
}

impl Debug for GoogleVisionExtractor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GoogleVisionExtractor")
            .field("config", &self.config)
            .finish()
    }
}

impl GoogleVisionExtractor {
    pub fn new(config: GoogleVisionConfig) -> Result<Self, ExtractionError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ExtractionError::Transport(format!(
                    "Failed to create HTTP client for Google Vision API: {}",
                    e
                ))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn annotate_url(&self) -> String {
        format!(
            "{}{}",
            self.config.endpoint.trim_end_matches('/'),
            ANNOTATE_PATH
        )
    }

    /// Pull the recognized text out of an annotate response.
    fn text_from_response(response: VisionResponse) -> Result<String, ExtractionError> {
        let Some(first) = response.responses.into_iter().next() else {
            return Ok(String::new());
        };

        if let Some(error) = first.error {
            let message = error.message.unwrap_or_default();
            if !message.is_empty() || error.code.unwrap_or(0) != 0 {
                return Err(ExtractionError::Service {
                    code: error.code,
                    message,
                });
            }
        }

        Ok(first
            .full_text_annotation
            .and_then(|annotation| annotation.text)
            .unwrap_or_default())
    }
}

#[async_trait]
impl TextExtractor for GoogleVisionExtractor {
    fn name(&self) -> &str {
        "google_vision"
    }

    async fn extract_text(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let image_base64 = base64::engine::general_purpose::STANDARD.encode(data);

        let request_body = json!({
            "requests": [{
                "image": {
                    "content": image_base64
                },
                "features": [{
                    "type": "DOCUMENT_TEXT_DETECTION"
                }]
            }]
        });

        tracing::debug!(image_size = data.len(), "Sending image to Google Cloud Vision API");

        let response = self
            .http_client
            .post(self.annotate_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                ExtractionError::Transport(format!(
                    "Failed to send request to Google Vision API: {}",
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExtractionError::Transport(format!(
                "Google Vision API request failed: {} - {}",
                status, error_text
            )));
        }

        let vision_response: VisionResponse = response.json().await.map_err(|e| {
            ExtractionError::InvalidResponse(format!(
                "Failed to parse Google Vision API response: {}",
                e.without_url()
            ))
        })?;

        let text = Self::text_from_response(vision_response)?;

        tracing::info!(
            text_chars = text.chars().count(),
            "Google Cloud Vision text detection completed"
        );

        Ok(text)
    }
}

// Google Cloud Vision API response types
#[derive(Debug, Deserialize)]
struct VisionResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    full_text_annotation: Option<TextAnnotation>,
    error: Option<VisionError>,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VisionError {
    code: Option<i32>,
    message: Option<String>,
}
