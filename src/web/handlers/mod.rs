//! API handlers for the image browser.

pub mod folder;
pub mod image;
pub mod list;
pub mod upload;

pub use folder::*;
pub use image::*;
pub use list::*;
pub use upload::*;

use crate::config::{StorageConfig, WebConfig};
use crate::file::ImageStore;

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Image storage.
    pub store: ImageStore,
    /// Maximum upload request size in bytes.
    pub max_upload_size: u64,
    /// `max-age` for served images, in seconds.
    pub image_cache_max_age: u64,
}

impl AppState {
    /// Create a new application state with default limits.
    pub fn new(store: ImageStore) -> Self {
        let storage = StorageConfig::default();
        let web = WebConfig::default();
        Self {
            store,
            max_upload_size: storage.max_upload_bytes(),
            image_cache_max_age: web.image_cache_max_age_secs,
        }
    }

    /// Set the maximum upload size in bytes.
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Set the cache lifetime for served images.
    pub fn with_image_cache_max_age(mut self, secs: u64) -> Self {
        self.image_cache_max_age = secs;
        self
    }
}
