use std::sync::Arc;

use pdfchat_core::{DocumentStore, GenerationBackend, TextExtractor};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub store: DocumentStore,
    pub extractor: Arc<dyn TextExtractor>,
    pub generator: Arc<dyn GenerationBackend>,
}
