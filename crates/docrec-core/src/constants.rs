//! Fixed values shared across crates.

/// Extension given to staged files whose original name has none.
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// Content type attached to archived objects.
pub const ARCHIVE_CONTENT_TYPE: &str = "image/png";

/// Logical prefix under which archived captures are stored.
pub const ARCHIVE_KEY_PREFIX: &str = "captures";

/// Table (collection) holding upload metadata.
pub const METADATA_COLLECTION: &str = "documents";

/// Number of characters of extracted text returned to the caller.
pub const SNIPPET_MAX_CHARS: usize = 600;

/// Appended to a snippet when the extracted text was cut.
pub const SNIPPET_CONTINUATION: &str = "...";
