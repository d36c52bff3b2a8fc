pub mod config;
pub mod extract;
pub mod generate;
pub mod prompt;
pub mod store;

// Re-export for convenience
pub use config::{ConfigFile, ModelConfig, load_config, resolve_model_config};
pub use extract::{ExtractError, ExtractedDocument, TextExtractor};
pub use generate::{GenerationBackend, GenerationError, GenerationParams, run_task};
pub use prompt::{InferenceTask, MAX_INPUT_TOKENS, build_prompt};
pub use store::{DocumentStore, StoredDocument};
