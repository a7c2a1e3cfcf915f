//! Folder handlers: create, delete, rename and move.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::web::dto::{
    CreateFolderRequest, DeleteFolderRequest, MessageResponse, MoveItemsRequest,
    MoveItemsResponse, RenameFolderRequest, RenameFolderResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/folder/create - Create a folder (and missing parents).
#[utoipa::path(
    post,
    path = "/api/folder/create",
    tag = "folders",
    request_body = CreateFolderRequest,
    responses(
        (status = 200, description = "Folder created", body = MessageResponse),
        (status = 400, description = "Folder name missing or invalid"),
        (status = 500, description = "Error creating folder")
    )
)]
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .create_folder(&req.folder_name, &req.current_path)
        .map_err(|e| ApiError::from_shelf(e, "Error creating folder"))?;

    Ok(Json(MessageResponse::new("Folder created successfully")))
}

/// POST /api/folder/delete - Delete a folder and everything in it.
#[utoipa::path(
    post,
    path = "/api/folder/delete",
    tag = "folders",
    request_body = DeleteFolderRequest,
    responses(
        (status = 200, description = "Folder deleted", body = MessageResponse),
        (status = 400, description = "Missing path, root folder, or not a folder"),
        (status = 404, description = "Folder not found"),
        (status = 500, description = "Error deleting folder")
    )
)]
pub async fn delete_folder(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<DeleteFolderRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .delete_folder(&req.folder_path)
        .map_err(|e| ApiError::from_shelf(e, "Error deleting folder"))?;

    Ok(Json(MessageResponse::new("Folder deleted successfully")))
}

/// POST /api/folder/renameFolder - Rename a folder within its parent.
#[utoipa::path(
    post,
    path = "/api/folder/renameFolder",
    tag = "folders",
    request_body = RenameFolderRequest,
    responses(
        (status = 200, description = "Folder renamed", body = RenameFolderResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Folder not found"),
        (status = 409, description = "Target name already exists"),
        (status = 500, description = "Error renaming folder")
    )
)]
pub async fn rename_folder(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RenameFolderRequest>,
) -> Result<Json<RenameFolderResponse>, ApiError> {
    let new_path = state
        .store
        .rename_folder(&req.current_path, &req.new_name)
        .map_err(|e| ApiError::from_shelf(e, "Error renaming folder"))?;

    Ok(Json(RenameFolderResponse {
        message: "Folder renamed successfully".to_string(),
        new_path,
    }))
}

/// POST /api/folder/move - Move files and folders into another folder.
///
/// Every item is moved independently; the status is 207 when any failed.
#[utoipa::path(
    post,
    path = "/api/folder/move",
    tag = "folders",
    request_body = MoveItemsRequest,
    responses(
        (status = 200, description = "All items moved", body = MoveItemsResponse),
        (status = 207, description = "Some items failed", body = MoveItemsResponse),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn move_items(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<MoveItemsRequest>,
) -> (StatusCode, Json<MoveItemsResponse>) {
    let destination = req.destination.unwrap_or_default();
    let outcome = state.store.move_items(req.items.as_slice(), &destination);

    let status = if outcome.is_complete() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    (status, Json(outcome.into()))
}
