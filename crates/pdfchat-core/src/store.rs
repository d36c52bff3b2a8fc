use std::sync::{Arc, RwLock};

/// The most recently uploaded document, reduced to its extracted text.
#[derive(Debug)]
pub struct StoredDocument {
    pub text: String,
    pub filename: String,
    pub page_count: usize,
}

/// Single-slot store for the current document.
///
/// Holds at most one document process-wide; a new upload replaces the
/// previous one unconditionally. Readers take an `Arc` snapshot, so an
/// in-flight question keeps operating on the document it started with even
/// if an upload lands mid-request.
#[derive(Debug, Default)]
pub struct DocumentStore {
    slot: RwLock<Option<Arc<StoredDocument>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current document. A document whose text is empty leaves
    /// the store observably empty.
    pub fn set(&self, doc: StoredDocument) {
        let next = if doc.text.is_empty() {
            None
        } else {
            Some(Arc::new(doc))
        };
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = next;
    }

    /// The current document, or `None` if nothing has been uploaded yet.
    pub fn snapshot(&self) -> Option<Arc<StoredDocument>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}
