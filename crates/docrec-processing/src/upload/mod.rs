pub mod pipeline;
pub mod types;

pub use pipeline::UploadPipeline;
pub use types::{IncomingFile, UploadError};
