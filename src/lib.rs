//! imgshelf - upload, browse and organize images.
//!
//! A small web service that manages a tree of image folders under a single
//! storage root, with a JSON API and a browser UI.

pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{Result, ShelfError};
pub use file::{classify, BatchOutcome, FailedItem, FolderEntry, ImageStore, Item, UploadFile};
pub use web::WebServer;
