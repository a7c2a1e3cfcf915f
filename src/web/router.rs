//! Router configuration for the web API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{
    CreateFolderRequest, DeleteFolderRequest, DeleteImagesRequest, DeleteImagesResponse,
    FailedItemResponse, FolderResponse, ItemResponse, MessageResponse, MoveItemsRequest,
    MoveItemsResponse, RenameFolderRequest, RenameFolderResponse, UploadResponse,
};
use super::handlers::{
    self, create_folder, delete_folder, delete_images, list_items, move_items, rename_folder,
    serve_image, upload_images, AppState,
};
use super::middleware::{create_cors_layer, security_headers};

/// OpenAPI document for the image browser API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list::list_items,
        handlers::folder::create_folder,
        handlers::folder::delete_folder,
        handlers::folder::rename_folder,
        handlers::folder::move_items,
        handlers::image::serve_image,
        handlers::image::delete_images,
        handlers::upload::upload_images,
    ),
    components(schemas(
        ItemResponse,
        FolderResponse,
        MessageResponse,
        RenameFolderResponse,
        FailedItemResponse,
        MoveItemsResponse,
        DeleteImagesResponse,
        UploadResponse,
        CreateFolderRequest,
        DeleteFolderRequest,
        RenameFolderRequest,
        MoveItemsRequest,
        DeleteImagesRequest,
    )),
    tags(
        (name = "browse", description = "Folder listings"),
        (name = "folders", description = "Folder management and moves"),
        (name = "images", description = "Image upload, download and deletion")
    )
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let max_upload = usize::try_from(app_state.max_upload_size).unwrap_or(usize::MAX);

    let folder_routes = Router::new()
        .route("/create", post(create_folder))
        .route("/delete", post(delete_folder))
        .route("/renameFolder", post(rename_folder))
        .route("/move", post(move_items));

    let image_routes = Router::new()
        .route(
            "/delete",
            post(delete_images).get(handlers::serve_delete_named_image),
        )
        .route("/*path", get(serve_image));

    let api_routes = Router::new()
        .route("/list", get(list_items))
        .route(
            "/upload",
            post(upload_images).layer(DefaultBodyLimit::max(max_upload)),
        )
        .nest("/folder", folder_routes)
        .nest("/images", image_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Create a router serving the browser UI from `static_path`.
///
/// Returns `None` if the directory does not exist.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let dir = Path::new(static_path);
    if !dir.is_dir() {
        tracing::warn!("Static directory not found: {}", static_path);
        return None;
    }

    Some(Router::new().fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)))
}
