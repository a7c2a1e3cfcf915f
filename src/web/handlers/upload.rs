//! Upload handler.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::UploadFile;
use crate::web::dto::UploadResponse;
use crate::web::error::{ApiError, ErrorCode};
use crate::web::handlers::AppState;

fn multipart_error(state: &AppState, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let max_mb = state.max_upload_size / 1024 / 1024;
        return ApiError::new(
            ErrorCode::PayloadTooLarge,
            format!("Upload too large (max {}MB)", max_mb),
        );
    }
    tracing::error!("Failed to read multipart data: {}", e);
    ApiError::bad_request("Invalid multipart data")
}

/// POST /api/upload - Upload one or more files.
///
/// Request body: multipart/form-data with one or more `images` file parts
/// and an optional `folder` text field (empty = root). Files with the same
/// name are overwritten.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "images",
    responses(
        (status = 200, description = "Files stored", body = UploadResponse),
        (status = 400, description = "No files or invalid names"),
        (status = 413, description = "Upload too large"),
        (status = 500, description = "Error saving file")
    )
)]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut folder = String::new();
    let mut files: Vec<UploadFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "images" | "image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(&state, e))?;

                // Browsers send an empty part when no file was picked.
                if filename.is_empty() && content.is_empty() {
                    continue;
                }
                if filename.is_empty() {
                    return Err(ApiError::bad_request("File part is missing a filename"));
                }
                files.push(UploadFile::new(filename, content.to_vec()));
            }
            "folder" => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&state, e))?;
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(ApiError::bad_request("No files uploaded"));
    }

    let stored = state
        .store
        .upload_files(&files, &folder)
        .map_err(|e| ApiError::from_shelf(e, "Error saving file"))?;

    Ok(Json(UploadResponse {
        message: format!("{} file(s) uploaded successfully", stored.len()),
        files: stored,
    }))
}
