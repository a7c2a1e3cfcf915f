//! Request DTOs for the web API.
//!
//! Missing string fields deserialize to empty strings and are rejected by
//! validation, so a missing field and an empty one both produce a 400 with
//! the same message.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for `GET /api/list`.
///
/// Flags are lenient: `true` and `1` are truthy, anything else is false.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Folder to list, relative to the storage root (empty = root).
    #[serde(default)]
    pub path: String,
    /// Include folders in the listing (default true).
    pub include_folders: Option<String>,
    /// Return every folder in the tree instead of the folder's children.
    pub get_all_folders: Option<String>,
}

fn flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) => v == "true" || v == "1",
    }
}

impl ListQuery {
    /// Whether directories should be part of the listing.
    pub fn include_folders(&self) -> bool {
        flag(self.include_folders.as_deref(), true)
    }

    /// Whether the whole folder tree was requested.
    pub fn get_all_folders(&self) -> bool {
        flag(self.get_all_folders.as_deref(), false)
    }
}

/// Create folder request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Name of the new folder. May contain `/` to create nested folders.
    #[serde(default)]
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub folder_name: String,
    /// Folder in which to create it (empty = root).
    #[serde(default)]
    pub current_path: String,
}

/// Delete folder request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFolderRequest {
    /// Folder to delete, recursively.
    #[serde(default)]
    #[validate(length(min = 1, message = "Folder path is required"))]
    pub folder_path: String,
}

/// Rename folder request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameFolderRequest {
    /// Folder to rename.
    #[serde(default)]
    #[validate(length(min = 1, message = "Current path and new name are required"))]
    pub current_path: String,
    /// New name, a single path segment.
    #[serde(default)]
    #[validate(length(min = 1, message = "Current path and new name are required"))]
    pub new_name: String,
}

/// Move items request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveItemsRequest {
    /// Relative paths of the items to move.
    #[serde(default)]
    #[validate(length(min = 1, message = "Invalid request: missing required fields"))]
    pub items: Vec<String>,
    /// Destination folder (empty = root).
    #[validate(required(message = "Invalid request: missing required fields"))]
    pub destination: Option<String>,
    /// Folder the client was browsing. Required, but moves do not depend on it.
    #[validate(required(message = "Invalid request: missing required fields"))]
    pub current_path: Option<String>,
}

/// Delete images request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImagesRequest {
    /// Relative paths of the files to delete.
    #[serde(default)]
    #[validate(length(min = 1, message = "Invalid request: no items given"))]
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_query_flags() {
        let query = ListQuery::default();
        assert!(query.include_folders());
        assert!(!query.get_all_folders());

        let query = ListQuery {
            path: "a".to_string(),
            include_folders: Some("false".to_string()),
            get_all_folders: Some("TRUE".to_string()),
        };
        assert!(!query.include_folders());
        assert!(query.get_all_folders());

        let query = ListQuery {
            include_folders: Some(String::new()),
            get_all_folders: Some("1".to_string()),
            ..Default::default()
        };
        assert!(query.include_folders());
        assert!(query.get_all_folders());
    }

    #[test]
    fn test_create_folder_request_camel_case() {
        let req: CreateFolderRequest =
            serde_json::from_value(json!({"folderName": "a", "currentPath": "x"})).unwrap();
        assert_eq!(req.folder_name, "a");
        assert_eq!(req.current_path, "x");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_folder_request_missing_name() {
        let req: CreateFolderRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_move_request_requires_destination() {
        let req: MoveItemsRequest =
            serde_json::from_value(json!({"items": ["a.png"], "currentPath": ""})).unwrap();
        assert!(req.validate().is_err());

        let req: MoveItemsRequest = serde_json::from_value(
            json!({"items": ["a.png"], "destination": "", "currentPath": ""}),
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_move_request_requires_current_path() {
        let req: MoveItemsRequest =
            serde_json::from_value(json!({"items": ["a.png"], "destination": "a"})).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("current_path"));
    }

    #[test]
    fn test_move_request_requires_items() {
        let req: MoveItemsRequest =
            serde_json::from_value(json!({"items": [], "destination": "a", "currentPath": ""}))
                .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_delete_images_request() {
        let req: DeleteImagesRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_err());

        let req: DeleteImagesRequest =
            serde_json::from_value(json!({"items": ["a/cat.png"]})).unwrap();
        assert!(req.validate().is_ok());
    }
}
