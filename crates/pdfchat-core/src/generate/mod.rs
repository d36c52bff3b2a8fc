//! Generation backend trait and task orchestration.

pub mod mock;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::prompt::{self, InferenceTask};

#[derive(Error, Debug)]
pub enum GenerationError {
    /// The inference server could not be reached, timed out, or shed load.
    #[error("generation service unavailable: {0}")]
    Unavailable(String),
    /// The server answered, but with an error or an undecodable body.
    #[error("generation backend error: {0}")]
    Backend(String),
}

/// Decoding parameters passed through to the generation model.
///
/// Lengths are in output tokens. `None` leaves the server's default in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationParams {
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub num_beams: Option<u32>,
    pub early_stopping: bool,
}

/// A text generation backend: consumes a fully formatted prompt, returns
/// the decoded top candidate.
///
/// Backends do not retry and report no confidence; a nonsensical or empty
/// completion is returned as-is.
pub trait GenerationBackend: Send + Sync {
    /// Backend name for logs (e.g. "seq2seq-http", "mock").
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;
}

/// Run `task` against `backend` with `context` as the document text.
///
/// Builds the prompt (template + truncation) and the task's decoding
/// parameters, so callers cannot bypass the prompt contract. `context`
/// must be non-empty; the router guarantees this.
pub async fn run_task(
    backend: &dyn GenerationBackend,
    task: &InferenceTask,
    context: &str,
) -> Result<String, GenerationError> {
    let prompt = prompt::build_prompt(task, context);
    let params = task.params();
    tracing::debug!(
        backend = backend.name(),
        prompt_bytes = prompt.len(),
        "requesting generation"
    );
    backend.generate(&prompt, &params).await
}
