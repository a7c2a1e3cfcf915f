//! Error types for imgshelf.

use thiserror::Error;

/// Common error type for imgshelf.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// A required field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A relative path escapes the storage root or contains forbidden characters.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The path exists but is not a directory.
    #[error("{0} is not a directory")]
    NotADirectory(String),

    /// The target of a rename already exists.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// The storage root itself may not be deleted.
    #[error("cannot delete the root folder")]
    CannotDeleteRoot,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ShelfError {
    /// Convert an I/O error raised while touching `rel_path`.
    ///
    /// A vanished path becomes `NotFound` so that stale listings surface as
    /// a missing resource rather than an internal error.
    pub fn from_io(err: std::io::Error, rel_path: &str) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ShelfError::NotFound(display_path(rel_path))
        } else {
            ShelfError::Io(err)
        }
    }
}

/// Render a relative path for messages, naming the root explicitly.
pub(crate) fn display_path(rel_path: &str) -> String {
    if rel_path.is_empty() {
        "root folder".to_string()
    } else {
        format!("'{rel_path}'")
    }
}

/// Result type alias for imgshelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;
