use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pdfchat_core::{ExtractError, GenerationError};

use crate::models::ErrorBody;

/// Typed request failures, surfaced to clients as `{"error": ...}` JSON.
#[derive(Debug)]
pub enum ApiError {
    /// `POST /upload-pdf` without a `file` part.
    NoFile,
    /// Multipart body could not be read, or the bytes are not a PDF.
    BadUpload(String),
    /// ask/summary before any successful upload.
    NoDocument,
    /// ask without a usable question.
    NoQuestion,
    /// The uploaded file could not be parsed as a PDF.
    UnprocessableDocument(String),
    /// The generation service failed or is unreachable.
    ModelUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::NoFile => (StatusCode::BAD_REQUEST, "No file provided".to_string()),
            ApiError::BadUpload(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NoDocument => {
                (StatusCode::BAD_REQUEST, "No PDF uploaded yet.".to_string())
            }
            ApiError::NoQuestion => {
                (StatusCode::BAD_REQUEST, "No question provided.".to_string())
            }
            ApiError::UnprocessableDocument(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::ModelUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        ApiError::UnprocessableDocument(e.to_string())
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        ApiError::ModelUnavailable(e.to_string())
    }
}
