//! Listing handler.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{FolderResponse, ItemResponse, ListQuery};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::ShelfError;

/// Listing failures keep the underlying error text in `details`.
fn list_error(err: ShelfError) -> ApiError {
    match err {
        ShelfError::Io(e) => {
            tracing::error!("Error listing items: {}", e);
            ApiError::internal("Error listing items").with_details(e.to_string())
        }
        other => ApiError::from(other),
    }
}

/// GET /api/list - List a folder, or every folder in the tree.
///
/// With `getAllFolders=true` the response is an array of `{path, name}` for
/// every folder below the root, ignoring `path`.
#[utoipa::path(
    get,
    path = "/api/list",
    tag = "browse",
    params(ListQuery),
    responses(
        (status = 200, description = "Children of the folder, or all folders", body = Vec<ItemResponse>),
        (status = 400, description = "Invalid path or not a folder"),
        (status = 404, description = "Folder not found"),
        (status = 500, description = "Listing failed")
    )
)]
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    if query.get_all_folders() {
        let folders: Vec<FolderResponse> = state
            .store
            .list_all_folders()
            .map_err(list_error)?
            .into_iter()
            .map(Into::into)
            .collect();
        return Ok(Json(folders).into_response());
    }

    let include_folders = query.include_folders();
    let items: Vec<ItemResponse> = state
        .store
        .list_children(&query.path)
        .map_err(list_error)?
        .into_iter()
        .filter(|item| include_folders || !item.is_directory)
        .map(Into::into)
        .collect();

    Ok(Json(items).into_response())
}
