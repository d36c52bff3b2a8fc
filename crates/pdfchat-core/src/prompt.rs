//! The prompt contract shared by every generation backend.
//!
//! The prompt templates and the input truncation limit are behavioral
//! contract, not implementation detail: changing either changes model
//! output non-trivially. They live here so every backend sees identical
//! inputs for a given document and task.

use crate::generate::GenerationParams;

/// Maximum prompt length fed to the model, in whitespace-delimited tokens.
///
/// Approximates the encoder's 512-token input limit. Anything past it is
/// silently dropped: no chunking, no sliding window, long documents lose
/// their tail.
pub const MAX_INPUT_TOKENS: usize = 512;

/// Instruction prefix for the summarization task.
pub const SUMMARIZE_PREFIX: &str = "summarize: ";

/// What the model is being asked to do with the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceTask {
    Summarize,
    Answer { question: String },
}

impl InferenceTask {
    /// Decoding parameters for this task.
    pub fn params(&self) -> GenerationParams {
        match self {
            InferenceTask::Summarize => GenerationParams {
                min_length: Some(30),
                max_length: Some(150),
                num_beams: Some(4),
                early_stopping: true,
            },
            InferenceTask::Answer { .. } => GenerationParams {
                min_length: None,
                max_length: Some(100),
                num_beams: Some(4),
                early_stopping: false,
            },
        }
    }
}

/// Format the task prompt over `context` and truncate it to
/// [`MAX_INPUT_TOKENS`].
pub fn build_prompt(task: &InferenceTask, context: &str) -> String {
    let full = match task {
        InferenceTask::Summarize => format!("{SUMMARIZE_PREFIX}{context}"),
        InferenceTask::Answer { question } => {
            format!("question: {question} context: {context}")
        }
    };
    truncate_tokens(&full, MAX_INPUT_TOKENS)
}

/// Keep the first `limit` whitespace-delimited tokens of `text`.
///
/// The surviving prefix is byte-identical to the input (internal whitespace
/// is preserved); only the tail past the limit-th token is dropped.
pub fn truncate_tokens(text: &str, limit: usize) -> String {
    if limit == 0 {
        return String::new();
    }

    let mut tokens = 0usize;
    let mut in_token = false;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if in_token {
                tokens += 1;
                in_token = false;
                if tokens == limit {
                    return text[..idx].to_string();
                }
            }
        } else {
            in_token = true;
        }
    }
    text.to_string()
}
