//! Test helpers for web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use imgshelf::web::handlers::AppState;
use imgshelf::web::router::create_router;
use imgshelf::ImageStore;
use serde_json::Value;
use tempfile::TempDir;

/// Create a test server over a fresh temporary storage root.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn create_test_server() -> (TestServer, TempDir, ImageStore) {
    create_test_server_with(|state| state)
}

/// Create a test server, letting the caller adjust the app state.
pub fn create_test_server_with(
    configure: impl FnOnce(AppState) -> AppState,
) -> (TestServer, TempDir, ImageStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = ImageStore::new(temp_dir.path().join("uploads")).expect("Failed to open store");

    let app_state = Arc::new(configure(AppState::new(store.clone())));
    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, temp_dir, store)
}

/// Write a file under the storage root, creating parent folders.
pub fn write_file(store: &ImageStore, relative: &str, content: &[u8]) {
    let path = store.resolve(relative).expect("invalid test path");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent");
    }
    std::fs::write(path, content).expect("Failed to write test file");
}

/// Names of the entries in a listing response.
pub fn names(listing: &Value) -> Vec<String> {
    listing
        .as_array()
        .expect("listing is not an array")
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}
