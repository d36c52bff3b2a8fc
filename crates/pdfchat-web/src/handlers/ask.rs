use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use pdfchat_core::{InferenceTask, run_task};

use crate::error::ApiError;
use crate::models::{AskRequest, AskResponse};
use crate::state::AppState;

pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AskResponse>, ApiError> {
    // Document presence is checked before the body is even parsed,
    // matching the documented operation order.
    let doc = state.store.snapshot().ok_or(ApiError::NoDocument)?;

    // A missing or malformed JSON body is treated as an empty request, so
    // it falls through to the question check.
    let request: AskRequest = serde_json::from_slice(&body).unwrap_or_default();

    let question = request
        .question
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::NoQuestion)?;

    let task = InferenceTask::Answer {
        question: question.clone(),
    };
    let answer = run_task(state.generator.as_ref(), &task, &doc.text)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "answer generation failed");
            ApiError::from(e)
        })?;

    Ok(Json(AskResponse { question, answer }))
}
