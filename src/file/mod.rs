//! Image file tree module for imgshelf.
//!
//! This module provides the folder browser core:
//! - Relative path normalization confined to the storage root
//! - Content type classification by extension
//! - Folder listings (one level, or every folder in the tree)
//! - Folder and batch file operations with per-item outcomes

mod listing;
pub mod mime;
mod mutation;
pub mod path;
mod storage;

pub use mime::{classify, is_image, Classification};
pub use mutation::{BatchOutcome, FailedItem, UploadFile};
pub use storage::{ImageFile, ImageStore};

/// A directory entry as seen by the browser.
///
/// Items are computed fresh from the filesystem on every listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Base name.
    pub name: String,
    /// Slash-separated path relative to the storage root.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Whether the entry is an image (`None` for directories).
    pub is_image: Option<bool>,
}

impl Item {
    /// Create a directory item.
    pub fn directory(path: String, name: String) -> Self {
        Self {
            name,
            path,
            is_directory: true,
            is_image: None,
        }
    }

    /// Create a file item.
    pub fn file(path: String, name: String, is_image: bool) -> Self {
        Self {
            name,
            path,
            is_directory: false,
            is_image: Some(is_image),
        }
    }
}

/// A folder anywhere in the tree, used for move destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    /// Slash-separated path relative to the storage root.
    pub path: String,
    /// Last path segment.
    pub name: String,
}
