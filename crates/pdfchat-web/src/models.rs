use serde::{Deserialize, Serialize};

pub const UPLOAD_OK_MESSAGE: &str = "PDF uploaded and processed successfully.";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    /// Absent, null, and empty string are all "no question provided".
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}
