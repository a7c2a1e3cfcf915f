//! Image storage rooted at a single directory.
//!
//! ```text
//! {root}/
//! ├── cat.png
//! ├── holidays/
//! │   ├── beach.jpg
//! │   └── 2024/
//! └── ...
//! ```
//!
//! Listing lives in `listing.rs`, folder and batch operations in `mutation.rs`.

use std::fs;
use std::path::{Path, PathBuf};

use super::mime::classify;
use super::path;
use crate::{Result, ShelfError};

/// File storage service for the image tree.
#[derive(Debug, Clone)]
pub struct ImageStore {
    /// Storage root directory.
    root: PathBuf,
}

/// A single image loaded from storage.
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Normalized relative path.
    pub path: String,
    /// Base name of the file.
    pub name: String,
    /// Content type from the classifier.
    pub content_type: String,
    /// File contents.
    pub content: Vec<u8>,
}

impl ImageStore {
    /// Create a new store with the given root.
    ///
    /// The root directory will be created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Get the storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path to an absolute path under the root.
    ///
    /// Performs no I/O. Paths escaping the root are `InvalidPath`.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        path::resolve(&self.root, relative)
    }

    /// Relative path of an absolute path under the root.
    pub fn relative_path(&self, absolute: &Path) -> Result<String> {
        path::relative_to(&self.root, absolute)
            .ok_or_else(|| ShelfError::InvalidPath(absolute.display().to_string()))
    }

    /// Check that `full_path` still lies under the root once symlinks are
    /// followed. `full_path` must exist.
    pub(crate) fn ensure_contained(&self, full_path: &Path, relative: &str) -> Result<()> {
        let root = fs::canonicalize(&self.root)?;
        let real = fs::canonicalize(full_path).map_err(|e| ShelfError::from_io(e, relative))?;
        if real.starts_with(&root) {
            Ok(())
        } else {
            tracing::warn!(path = %relative, "Rejected symlink leaving the storage root");
            Err(ShelfError::InvalidPath(relative.to_string()))
        }
    }

    /// Load a file for serving.
    ///
    /// Directories are reported as not found.
    pub fn load(&self, relative: &str) -> Result<ImageFile> {
        let normalized = path::normalize(relative)?;
        let full_path = self.resolve(&normalized)?;

        let metadata = fs::metadata(&full_path).map_err(|e| ShelfError::from_io(e, &normalized))?;
        if !metadata.is_file() {
            return Err(ShelfError::NotFound(format!("'{normalized}'")));
        }
        self.ensure_contained(&full_path, &normalized)?;

        let content = fs::read(&full_path).map_err(|e| ShelfError::from_io(e, &normalized))?;
        let name = path::base_name(&normalized).to_string();
        let content_type = classify(&name).content_type;

        Ok(ImageFile {
            path: normalized,
            name,
            content_type,
            content,
        })
    }

    /// Check whether a relative path exists.
    pub fn exists(&self, relative: &str) -> bool {
        self.resolve(relative)
            .map(|p| p.symlink_metadata().is_ok())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, ImageStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::new(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("uploads");

        assert!(!root.exists());

        let store = ImageStore::new(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(store.root(), root);
    }

    #[test]
    fn test_resolve_and_relative_path() {
        let (_temp_dir, store) = setup_store();

        let abs = store.resolve("a//b/../c.png").unwrap();
        assert_eq!(abs, store.root().join("a").join("c.png"));
        assert_eq!(store.relative_path(&abs).unwrap(), "a/c.png");
        assert_eq!(store.relative_path(store.root()).unwrap(), "");
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let (_temp_dir, store) = setup_store();
        assert!(matches!(store.resolve("../secret"), Err(ShelfError::InvalidPath(_))));
    }

    #[test]
    fn test_load_image() {
        let (_temp_dir, store) = setup_store();
        fs::create_dir(store.root().join("a")).unwrap();
        fs::write(store.root().join("a").join("cat.PNG"), b"png-bytes").unwrap();

        let image = store.load("/a/cat.PNG").unwrap();

        assert_eq!(image.path, "a/cat.PNG");
        assert_eq!(image.name, "cat.PNG");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.content, b"png-bytes");
    }

    #[test]
    fn test_load_non_image_is_octet_stream() {
        let (_temp_dir, store) = setup_store();
        fs::write(store.root().join("notes.txt"), b"hi").unwrap();

        let file = store.load("notes.txt").unwrap();
        assert_eq!(file.content_type, "application/octet-stream");
    }

    #[test]
    fn test_load_not_found() {
        let (_temp_dir, store) = setup_store();
        assert!(matches!(store.load("missing.png"), Err(ShelfError::NotFound(_))));
    }

    #[test]
    fn test_load_directory_is_not_found() {
        let (_temp_dir, store) = setup_store();
        fs::create_dir(store.root().join("folder")).unwrap();

        assert!(matches!(store.load("folder"), Err(ShelfError::NotFound(_))));
    }

    #[test]
    fn test_exists() {
        let (_temp_dir, store) = setup_store();
        fs::write(store.root().join("x.gif"), b"gif").unwrap();

        assert!(store.exists("x.gif"));
        assert!(store.exists(""));
        assert!(!store.exists("y.gif"));
        assert!(!store.exists("../x.gif"));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_symlink_outside_root_rejected() {
        let (_temp_dir, store) = setup_store();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.png"), b"secret").unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret.png"),
            store.root().join("link.png"),
        )
        .unwrap();

        assert!(matches!(store.load("link.png"), Err(ShelfError::InvalidPath(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_symlink_inside_root_allowed() {
        let (_temp_dir, store) = setup_store();
        fs::write(store.root().join("cat.png"), b"cat").unwrap();
        std::os::unix::fs::symlink(store.root().join("cat.png"), store.root().join("alias.png"))
            .unwrap();

        assert_eq!(store.load("alias.png").unwrap().content, b"cat");
    }
}
