//! Folder and batch file operations.
//!
//! Batch operations (move, delete) treat every item independently: one
//! item's failure never stops the others, and nothing is rolled back.

use std::fs;
use std::io;
use std::path::Path;

use super::path;
use super::storage::ImageStore;
use crate::error::display_path;
use crate::{Result, ShelfError};

/// An item that could not be processed in a batch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    /// The item exactly as supplied by the client.
    pub item: String,
    /// Human-readable reason.
    pub error: String,
}

/// Per-item results of a batch operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Items processed successfully, in input order.
    pub succeeded: Vec<String>,
    /// Items that failed, in input order.
    pub failed: Vec<FailedItem>,
}

impl BatchOutcome {
    /// True when no item failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl FromIterator<(String, Result<()>)> for BatchOutcome {
    fn from_iter<I: IntoIterator<Item = (String, Result<()>)>>(iter: I) -> Self {
        let mut outcome = BatchOutcome::default();
        for (item, result) in iter {
            match result {
                Ok(()) => outcome.succeeded.push(item),
                Err(e) => outcome.failed.push(FailedItem {
                    item,
                    error: e.to_string(),
                }),
            }
        }
        outcome
    }
}

/// A file received for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Client-supplied filename. Only its last path segment is used.
    pub filename: String,
    /// File contents.
    pub content: Vec<u8>,
}

impl UploadFile {
    /// Create a new upload file.
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Base name of the client filename.
    ///
    /// Browsers may send full paths, with either separator.
    fn stored_name(&self) -> &str {
        self.filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or("")
            .trim()
    }
}

fn map_exists(err: io::Error, rel_path: &str) -> ShelfError {
    if err.kind() == io::ErrorKind::AlreadyExists {
        ShelfError::AlreadyExists(display_path(rel_path))
    } else {
        ShelfError::from_io(err, rel_path)
    }
}

impl ImageStore {
    /// Create `folder_name` under `current_path`, including missing parents.
    ///
    /// Creating a folder that already exists succeeds. Returns the relative
    /// path of the folder.
    pub fn create_folder(&self, folder_name: &str, current_path: &str) -> Result<String> {
        if folder_name.trim().is_empty() {
            return Err(ShelfError::InvalidInput("folder name is required".to_string()));
        }
        if folder_name.chars().any(char::is_control) {
            return Err(ShelfError::InvalidInput(
                "folder name contains control characters".to_string(),
            ));
        }

        let target = path::normalize(&path::join(current_path, folder_name))?;
        if target.is_empty() {
            return Err(ShelfError::InvalidInput(format!(
                "invalid folder name '{folder_name}'"
            )));
        }

        let full_path = self.resolve(&target)?;
        fs::create_dir_all(&full_path).map_err(|e| map_exists(e, &target))?;

        tracing::info!(folder = %target, "Created folder");
        Ok(target)
    }

    /// Recursively delete a folder.
    ///
    /// The root is refused before touching the filesystem.
    pub fn delete_folder(&self, folder_path: &str) -> Result<()> {
        let folder = path::normalize(folder_path)?;
        if folder.is_empty() {
            return Err(ShelfError::CannotDeleteRoot);
        }

        let full_path = self.resolve(&folder)?;
        let metadata =
            fs::symlink_metadata(&full_path).map_err(|e| ShelfError::from_io(e, &folder))?;
        if !metadata.is_dir() {
            return Err(ShelfError::NotADirectory(display_path(&folder)));
        }

        fs::remove_dir_all(&full_path).map_err(|e| ShelfError::from_io(e, &folder))?;

        tracing::info!(folder = %folder, "Deleted folder");
        Ok(())
    }

    /// Rename an entry in place, keeping its parent.
    ///
    /// Returns the new relative path.
    pub fn rename_folder(&self, current_path: &str, new_name: &str) -> Result<String> {
        let current = path::normalize(current_path)?;
        if current.is_empty() {
            return Err(ShelfError::InvalidInput(
                "cannot rename the root folder".to_string(),
            ));
        }
        path::validate_name(new_name)?;

        let source = self.resolve(&current)?;
        fs::symlink_metadata(&source).map_err(|e| ShelfError::from_io(e, &current))?;

        let new_path = path::join(path::parent(&current), new_name);
        if new_path == current {
            return Ok(new_path);
        }

        let target = self.resolve(&new_path)?;
        if target.symlink_metadata().is_ok() {
            return Err(ShelfError::AlreadyExists(display_path(&new_path)));
        }

        fs::rename(&source, &target).map_err(|e| ShelfError::from_io(e, &current))?;

        tracing::info!(from = %current, to = %new_path, "Renamed folder");
        Ok(new_path)
    }

    /// Move each item into `destination` (empty = root), keeping its name.
    pub fn move_items<S: AsRef<str>>(&self, items: &[S], destination: &str) -> BatchOutcome {
        let outcome: BatchOutcome = items
            .iter()
            .map(|item| {
                let item = item.as_ref();
                (item.to_string(), self.move_one(item, destination))
            })
            .collect();

        for failed in &outcome.failed {
            tracing::warn!(item = %failed.item, error = %failed.error, "Failed to move item");
        }
        tracing::info!(
            moved = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            destination = %destination,
            "Moved items"
        );
        outcome
    }

    fn move_one(&self, item: &str, destination: &str) -> Result<()> {
        let source_rel = path::normalize(item)?;
        if source_rel.is_empty() {
            return Err(ShelfError::InvalidInput(
                "cannot move the root folder".to_string(),
            ));
        }
        let source = self.resolve(&source_rel)?;
        fs::symlink_metadata(&source).map_err(|e| ShelfError::from_io(e, &source_rel))?;

        let dest_dir = path::normalize(destination)?;
        let dest_rel = path::join(&dest_dir, path::base_name(&source_rel));
        if dest_rel == source_rel {
            return Ok(());
        }
        if dest_dir == source_rel || dest_dir.starts_with(&format!("{source_rel}/")) {
            return Err(ShelfError::InvalidInput(format!(
                "cannot move '{source_rel}' into itself"
            )));
        }

        // A file at or above the destination cannot hold the moved item.
        let dest_full = self.resolve(&dest_dir)?;
        let blocked = dest_full
            .ancestors()
            .take_while(|p| p.starts_with(self.root()))
            .any(Path::is_file);
        if blocked {
            return Err(ShelfError::NotADirectory(display_path(&dest_dir)));
        }
        fs::create_dir_all(&dest_full).map_err(|e| map_exists(e, &dest_dir))?;

        let target = self.resolve(&dest_rel)?;

        fs::rename(&source, &target).map_err(|e| ShelfError::from_io(e, &source_rel))?;
        Ok(())
    }

    /// Delete each item as a single file. Directories are refused.
    pub fn delete_items<S: AsRef<str>>(&self, items: &[S]) -> BatchOutcome {
        let outcome: BatchOutcome = items
            .iter()
            .map(|item| {
                let item = item.as_ref();
                (item.to_string(), self.delete_one(item))
            })
            .collect();

        for failed in &outcome.failed {
            tracing::warn!(item = %failed.item, error = %failed.error, "Failed to delete item");
        }
        tracing::info!(
            deleted = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Deleted items"
        );
        outcome
    }

    fn delete_one(&self, item: &str) -> Result<()> {
        let rel = path::normalize(item)?;
        if rel.is_empty() {
            return Err(ShelfError::CannotDeleteRoot);
        }

        let full_path = self.resolve(&rel)?;
        let metadata =
            fs::symlink_metadata(&full_path).map_err(|e| ShelfError::from_io(e, &rel))?;
        if metadata.is_dir() {
            return Err(ShelfError::InvalidInput(format!("'{rel}' is a directory")));
        }

        fs::remove_file(&full_path).map_err(|e| ShelfError::from_io(e, &rel))
    }

    /// Write uploaded files into `destination`, creating it if needed.
    ///
    /// Existing files with the same name are overwritten. Names are checked
    /// before anything is written, but an I/O error part way through leaves
    /// earlier files in place. Returns the stored relative paths.
    pub fn upload_files(&self, files: &[UploadFile], destination: &str) -> Result<Vec<String>> {
        if files.is_empty() {
            return Err(ShelfError::InvalidInput("no files uploaded".to_string()));
        }
        for file in files {
            path::validate_name(file.stored_name())?;
        }

        let folder = path::normalize(destination)?;
        let folder_path = self.resolve(&folder)?;
        fs::create_dir_all(&folder_path).map_err(|e| map_exists(e, &folder))?;

        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            let rel = path::join(&folder, file.stored_name());
            fs::write(folder_path.join(file.stored_name()), &file.content)?;
            tracing::debug!(path = %rel, size = file.content.len(), "Stored upload");
            stored.push(rel);
        }

        tracing::info!(folder = %folder, count = stored.len(), "Uploaded files");
        Ok(stored)
    }
}
