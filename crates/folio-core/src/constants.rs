//! Shared constants

/// Content type recorded when an upload declares none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Fallback token when sanitizing a name leaves nothing usable.
pub const DEFAULT_FILE_TOKEN: &str = "file";

/// Default per-file size cap (100 MB), overridable via `MAX_FILE_SIZE_BYTES`.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 100 * 1024 * 1024;
