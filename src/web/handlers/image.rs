//! Image handlers: serve and batch delete.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::web::dto::{DeleteImagesRequest, DeleteImagesResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Uploaded SVGs may carry scripts; never let a served file run them.
const IMAGE_CSP: &str = "default-src 'none'; style-src 'unsafe-inline'; sandbox";

/// Build an inline Content-Disposition header value.
///
/// Control characters are removed, quotes and backslashes replaced in the
/// plain `filename`, and non-ASCII names are also sent RFC 5987 encoded.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("inline; filename=\"{}\"", filename);
    }

    format!(
        "inline; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized,
        urlencoding::encode(filename)
    )
}

/// GET /api/images/{path} - Serve a stored file.
///
/// The content type comes from the file extension.
#[utoipa::path(
    get,
    path = "/api/images/{path}",
    tag = "images",
    params(
        ("path" = String, Path, description = "File path relative to the storage root")
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 400, description = "Invalid path"),
        (status = 404, description = "File not found")
    )
)]
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response<Body>, ApiError> {
    image_response(&state, &path)
}

/// GET /api/images/delete - Serve a root-level file named `delete`.
///
/// The batch delete route takes this path, so GET is routed here instead of
/// to the wildcard.
pub async fn serve_delete_named_image(
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, ApiError> {
    image_response(&state, "delete")
}

fn image_response(state: &AppState, path: &str) -> Result<Response<Body>, ApiError> {
    let image = state
        .store
        .load(path)
        .map_err(|e| ApiError::from_shelf(e, "Error serving image"))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, image.content_type)
        .header(header::CONTENT_LENGTH, image.content.len())
        .header(
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.image_cache_max_age),
        )
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&image.name),
        )
        .header(header::CONTENT_SECURITY_POLICY, IMAGE_CSP)
        .body(Body::from(image.content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// POST /api/images/delete - Delete files.
///
/// Every item is deleted independently; the status is 207 when any failed.
#[utoipa::path(
    post,
    path = "/api/images/delete",
    tag = "images",
    request_body = DeleteImagesRequest,
    responses(
        (status = 200, description = "All items deleted", body = DeleteImagesResponse),
        (status = 207, description = "Some items failed", body = DeleteImagesResponse),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn delete_images(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<DeleteImagesRequest>,
) -> (StatusCode, Json<DeleteImagesResponse>) {
    let outcome = state.store.delete_items(req.items.as_slice());

    let status = if outcome.is_complete() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    (status, Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_simple_ascii() {
        assert_eq!(
            content_disposition_header("cat.png"),
            "inline; filename=\"cat.png\""
        );
        assert_eq!(
            content_disposition_header("my cat.png"),
            "inline; filename=\"my cat.png\""
        );
    }

    #[test]
    fn test_content_disposition_unicode() {
        let result = content_disposition_header("猫.png");
        assert!(result.starts_with("inline; filename=\""));
        assert!(result.contains("filename*=UTF-8''%E7%8C%AB.png"));
    }

    #[test]
    fn test_content_disposition_quote_and_backslash() {
        let result = content_disposition_header("a\"b\\c.png");
        assert!(result.contains("filename=\"a_b_c.png\""));
        assert!(result.contains("%22"));
    }

    #[test]
    fn test_content_disposition_strips_control_characters() {
        let result = content_disposition_header("cat\r\nX-Injected: 1.png");
        assert!(!result.contains('\r'));
        assert!(!result.contains('\n'));
        assert!(result.starts_with("inline; filename="));
    }
}
