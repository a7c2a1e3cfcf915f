//! Directory listings.

use std::fs;
use std::io;

use super::mime::is_image;
use super::path;
use super::storage::ImageStore;
use super::{FolderEntry, Item};
use crate::{Result, ShelfError};

impl ImageStore {
    /// List the immediate children of a folder, sorted by name.
    ///
    /// Entries whose names are not valid UTF-8 are skipped.
    pub fn list_children(&self, relative: &str) -> Result<Vec<Item>> {
        let folder = path::normalize(relative)?;
        let full_path = self.resolve(&folder)?;

        let metadata = fs::metadata(&full_path).map_err(|e| ShelfError::from_io(e, &folder))?;
        if !metadata.is_dir() {
            return Err(ShelfError::NotADirectory(format!("'{folder}'")));
        }
        self.ensure_contained(&full_path, &folder)?;

        let entries = fs::read_dir(&full_path).map_err(|e| ShelfError::from_io(e, &folder))?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = ?entry.path(), "Skipping entry with non UTF-8 name");
                continue;
            };

            // Follow symlinks so a linked folder lists as a folder.
            let is_directory = match fs::metadata(entry.path()) {
                Ok(m) => m.is_dir(),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // Removed since read_dir, or a dangling symlink.
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let item = if is_directory {
                Item::directory(path::join(&folder, &name), name)
            } else {
                let image = is_image(&name);
                Item::file(path::join(&folder, &name), name, image)
            };
            items.push(item);
        }

        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    /// Walk the whole tree and collect every folder below the root.
    ///
    /// Symlinked directories are not followed. Folders that disappear during
    /// the walk are skipped. The result is sorted by path.
    pub fn list_all_folders(&self) -> Result<Vec<FolderEntry>> {
        let mut folders = Vec::new();
        let mut pending = vec![(self.root().to_path_buf(), String::new())];

        while let Some((dir, rel)) = pending.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if !rel.is_empty() && e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) if !rel.is_empty() => {
                    tracing::warn!(folder = %rel, error = %e, "Skipping unreadable folder");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            for entry in entries.flatten() {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir {
                    continue;
                }
                let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                    tracing::warn!(path = ?entry.path(), "Skipping folder with non UTF-8 name");
                    continue;
                };

                let child_rel = path::join(&rel, &name);
                pending.push((entry.path(), child_rel.clone()));
                folders.push(FolderEntry {
                    path: child_rel,
                    name,
                });
            }
        }

        folders.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(folders)
    }
}
