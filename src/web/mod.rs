//! Web API module for imgshelf.
//!
//! This module exposes the image tree over a JSON API, serves stored images
//! and, optionally, the static browser UI.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
