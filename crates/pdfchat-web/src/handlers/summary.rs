use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use pdfchat_core::{InferenceTask, run_task};

use crate::error::ApiError;
use crate::models::SummaryResponse;
use crate::state::AppState;

pub async fn summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let doc = state.store.snapshot().ok_or(ApiError::NoDocument)?;

    let summary = run_task(state.generator.as_ref(), &InferenceTask::Summarize, &doc.text)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "summary generation failed");
            ApiError::from(e)
        })?;

    Ok(Json(SummaryResponse { summary }))
}
