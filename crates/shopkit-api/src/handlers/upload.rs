//! Standalone image upload endpoint.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::multipart::read_upload_form;
use axum::{extract::Multipart, extract::State, Json};
use serde::Serialize;
use shopkit_core::AppError;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Stable public URL of the stored image.
    pub url: String,
}

/// Upload a single image and get back its public URL.
///
/// Unlike product creation, a storage failure here is terminal: the client
/// asked for exactly one thing and it did not happen.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "uploads",
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No file part in the request", body = ErrorResponse),
        (status = 500, description = "Bucket missing or storage write failed", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let file = read_upload_form(multipart)
        .await?
        .ok_or(AppError::MissingFile)?;

    let stored = state.uploads.store_image(file).await?;

    Ok(Json(UploadResponse {
        url: stored.public_url,
    }))
}
