use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};

use pdfchat_core::StoredDocument;

use crate::error::ApiError;
use crate::models::{UPLOAD_OK_MESSAGE, UploadResponse};
use crate::state::AppState;
use crate::upload;

pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let file = upload::parse_multipart(multipart).await?;

    // Per-request temp dir (auto-cleaned on drop), never a shared path, so
    // concurrent uploads cannot read each other's bytes.
    let temp_dir = tempfile::tempdir()
        .map_err(|e| ApiError::Internal(format!("Failed to create temp directory: {e}")))?;
    let pdf_path = temp_dir.path().join("upload.pdf");
    std::fs::write(&pdf_path, &file.data)
        .map_err(|e| ApiError::Internal(format!("Failed to write temp file: {e}")))?;

    // Extraction is blocking (mupdf is not async).
    let extractor = Arc::clone(&state.extractor);
    let extracted = tokio::task::spawn_blocking(move || extractor.extract(&pdf_path))
        .await
        .map_err(|e| ApiError::Internal(format!("Extraction task error: {e}")))??;

    drop(temp_dir);

    tracing::info!(
        filename = %file.filename,
        pages = extracted.page_count,
        text_bytes = extracted.text.len(),
        "document uploaded"
    );

    state.store.set(StoredDocument {
        text: extracted.text,
        filename: file.filename,
        page_count: extracted.page_count,
    });

    Ok(Json(UploadResponse {
        message: UPLOAD_OK_MESSAGE.to_string(),
    }))
}
