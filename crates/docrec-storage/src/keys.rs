//! Shared name and key generation for staging and archive.

use std::path::Path;

use docrec_core::constants::{ARCHIVE_KEY_PREFIX, DEFAULT_IMAGE_EXTENSION};
use uuid::Uuid;

/// Extension of `filename`, case preserved, or the default image extension.
///
/// Only the final path component is considered, so directory parts and leading dots
/// (`.profile`) never produce an extension.
pub fn extension_for(filename: &str) -> &str {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_IMAGE_EXTENSION)
}

/// Generate a collision-resistant local name for a staged upload.
pub fn generate_staged_name(suggested_filename: &str) -> String {
    format!(
        "{}.{}",
        Uuid::new_v4().simple(),
        extension_for(suggested_filename)
    )
}

/// Archive key for a staged file: `captures/{staged name}`.
pub fn archive_key(staged_name: &str) -> String {
    format!("{}/{}", ARCHIVE_KEY_PREFIX, staged_name)
}
