//! Validated JSON extraction for web API requests.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// Malformed JSON and failed validation are both reported as 400.
///
/// # Example
///
/// ```ignore
/// use imgshelf::web::dto::ValidatedJson;
///
/// async fn create_folder(
///     ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
/// ) -> Result<Json<MessageResponse>, ApiError> {
///     // req.folder_name is non-empty here
///     // ...
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}
