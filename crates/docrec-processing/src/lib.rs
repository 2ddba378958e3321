//! Upload orchestration: staging followed by the optional enrichment stages.

pub mod capability;
pub mod upload;

pub use capability::{Capability, StageOutcome};
pub use upload::{IncomingFile, UploadError, UploadPipeline};
