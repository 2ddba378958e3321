//! Shared application state.

use docrec_core::Config;
use docrec_processing::UploadPipeline;

/// State handed to every handler behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: UploadPipeline,
}

impl AppState {
    pub fn new(config: Config, pipeline: UploadPipeline) -> Self {
        Self { config, pipeline }
    }
}
