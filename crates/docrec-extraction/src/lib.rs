//! Text extraction backends
//!
//! An extractor turns raw image bytes into recognized text. "No text found" is a
//! successful, empty result; only service and transport problems are errors.

pub mod google_vision;
pub mod traits;

pub use google_vision::{GoogleVisionConfig, GoogleVisionExtractor};
pub use traits::{ExtractionError, TextExtractor};
