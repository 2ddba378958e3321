//! PostgreSQL persistence for upload metadata
//!
//! One row per accepted upload lands in the `documents` table. Records are written once
//! and never updated by this service.

pub mod documents;
pub mod pool;

pub use documents::{MetadataRepository, PgMetadataRepository};
pub use pool::setup_pool;
