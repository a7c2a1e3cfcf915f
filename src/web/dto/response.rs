//! Response DTOs for the web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::file::{BatchOutcome, FailedItem, FolderEntry, Item};

/// A folder entry in a listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Base name.
    pub name: String,
    /// Path relative to the storage root.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Whether the entry is an image (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_image: Option<bool>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            name: item.name,
            path: item.path,
            is_directory: item.is_directory,
            is_image: item.is_image,
        }
    }
}

/// A folder anywhere in the tree.
#[derive(Debug, Serialize, ToSchema)]
pub struct FolderResponse {
    /// Path relative to the storage root.
    pub path: String,
    /// Folder name.
    pub name: String,
}

impl From<FolderEntry> for FolderResponse {
    fn from(folder: FolderEntry) -> Self {
        Self {
            path: folder.path,
            name: folder.name,
        }
    }
}

/// Plain message response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rename folder response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameFolderResponse {
    /// Human-readable message.
    pub message: String,
    /// New path relative to the storage root.
    pub new_path: String,
}

/// An item that failed in a batch operation.
#[derive(Debug, Serialize, ToSchema)]
pub struct FailedItemResponse {
    /// The item as sent by the client.
    pub item: String,
    /// Reason for the failure.
    pub error: String,
}

impl From<FailedItem> for FailedItemResponse {
    fn from(failed: FailedItem) -> Self {
        Self {
            item: failed.item,
            error: failed.error,
        }
    }
}

/// Move items response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveItemsResponse {
    /// Summary message.
    pub message: String,
    /// Items moved.
    pub moved_items: Vec<String>,
    /// Items that could not be moved.
    pub failed_items: Vec<FailedItemResponse>,
}

impl From<BatchOutcome> for MoveItemsResponse {
    fn from(outcome: BatchOutcome) -> Self {
        let message = if outcome.succeeded.is_empty() {
            "No items were moved".to_string()
        } else {
            format!("Successfully moved {} item(s)", outcome.succeeded.len())
        };
        Self {
            message,
            moved_items: outcome.succeeded,
            failed_items: outcome.failed.into_iter().map(Into::into).collect(),
        }
    }
}

/// Delete images response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImagesResponse {
    /// Summary message.
    pub message: String,
    /// Items deleted.
    pub deleted_items: Vec<String>,
    /// Items that could not be deleted.
    pub failed_items: Vec<FailedItemResponse>,
}

impl From<BatchOutcome> for DeleteImagesResponse {
    fn from(outcome: BatchOutcome) -> Self {
        let message = if outcome.succeeded.is_empty() {
            "No items were deleted".to_string()
        } else {
            format!("Successfully deleted {} item(s)", outcome.succeeded.len())
        };
        Self {
            message,
            deleted_items: outcome.succeeded,
            failed_items: outcome.failed.into_iter().map(Into::into).collect(),
        }
    }
}

/// Upload response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Summary message.
    pub message: String,
    /// Stored paths relative to the storage root.
    pub files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_item_response_directory_omits_is_image() {
        let item = ItemResponse::from(Item::directory("a".into(), "a".into()));
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value, json!({"name": "a", "path": "a", "isDirectory": true}));
    }

    #[test]
    fn test_item_response_file() {
        let item = ItemResponse::from(Item::file("a/cat.png".into(), "cat.png".into(), true));
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["path"], "a/cat.png");
        assert_eq!(value["isDirectory"], false);
        assert_eq!(value["isImage"], true);
    }

    #[test]
    fn test_move_response_messages() {
        let outcome = BatchOutcome {
            succeeded: vec!["a/cat.png".into()],
            failed: vec![FailedItem {
                item: "missing.png".into(),
                error: "'missing.png' not found".into(),
            }],
        };
        let value: Value = serde_json::to_value(MoveItemsResponse::from(outcome)).unwrap();

        assert_eq!(value["message"], "Successfully moved 1 item(s)");
        assert_eq!(value["movedItems"], json!(["a/cat.png"]));
        assert_eq!(value["failedItems"][0]["item"], "missing.png");

        let empty = MoveItemsResponse::from(BatchOutcome::default());
        assert_eq!(empty.message, "No items were moved");
    }

    #[test]
    fn test_delete_response_messages() {
        let outcome = BatchOutcome {
            succeeded: vec!["x.png".into(), "y.png".into()],
            failed: vec![],
        };
        let response = DeleteImagesResponse::from(outcome);
        assert_eq!(response.message, "Successfully deleted 2 item(s)");

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["deletedItems"], json!(["x.png", "y.png"]));
        assert_eq!(value["failedItems"], json!([]));
    }
}
