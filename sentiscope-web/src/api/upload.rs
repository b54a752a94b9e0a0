//! Upload endpoint
//!
//! POST /upload with multipart field `file`.

use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::services::annotate_upload;
use crate::AppState;

/// Name of the multipart field carrying the CSV
pub const FILE_FIELD: &str = "file";

/// POST /upload
///
/// Annotates the uploaded CSV and redirects to its result page.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Redirect> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.body_text()))?
    {
        // Parts without a filename are plain form fields, not files
        let filename = match (field.name(), field.file_name()) {
            (Some(FILE_FIELD), Some(filename)) => filename.to_string(),
            _ => continue,
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Multipart(e.body_text()))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) = upload.ok_or(ApiError::NoFileUploaded)?;
    if filename.is_empty() {
        return Err(ApiError::NoSelectedFile);
    }

    info!(filename = %filename, size = bytes.len(), "Received upload");

    let outcome = annotate_upload(&state.store, state.classifier.as_ref(), &filename, &bytes).await?;

    Ok(Redirect::to(&format!("/result/{}", outcome.result_name)))
}
