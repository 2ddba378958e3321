//! Domain models module
//!
//! This module contains the record produced for every upload and the summary
//! returned to the caller.

pub mod upload;

pub use upload::{text_snippet, UploadRecord, UploadResponse};
