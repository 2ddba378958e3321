//! Docrec Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! every docrec component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{ArchiveProvider, BackendConfig, BaseConfig, Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{text_snippet, UploadRecord, UploadResponse};
