//! Docrec Storage Library
//!
//! This crate provides the two storage roles of the upload pipeline:
//!
//! - [`StagingStore`]: the mandatory local copy every upload is written to first
//!   ([`LocalStagingStore`]).
//! - [`ArchiveStore`]: the optional remote copy ([`ObjectStoreArchive`], backed by
//!   Google Cloud Storage or an S3-compatible store through `object_store`).
//!
//! # Key format
//!
//! Staged files are named `{uuid}.{extension}` inside the staging directory. Archived
//! objects live at `captures/{staged name}` so archive keys are unique whenever staged
//! names are. Key generation is centralized in the `keys` module.

pub mod archive;
pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use archive::ObjectStoreArchive;
pub use factory::create_archive_store;
pub use local::LocalStagingStore;
pub use traits::{ArchiveStore, StagedFile, StagingStore, StorageError, StorageResult};
