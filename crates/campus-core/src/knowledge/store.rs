//! Read-only knowledge store, loaded once at startup and shared by reference.

use super::model::KnowledgeBase;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge base: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse knowledge base: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable view of the knowledge base document.
///
/// An unavailable store (file missing, malformed or empty) never matches a query and
/// contributes no context to the generative model.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    document: Option<KnowledgeBase>,
}

impl KnowledgeStore {
    /// Store with no document; every lookup misses.
    pub fn unavailable() -> Self {
        Self { document: None }
    }

    /// Wraps an in-memory document. A document with no sections is treated as unavailable.
    pub fn from_document(document: KnowledgeBase) -> Self {
        if document.is_empty() {
            return Self::unavailable();
        }
        Self {
            document: Some(document),
        }
    }

    /// Parses the JSON document at `path`.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let document: KnowledgeBase = serde_json::from_str(&raw)?;
        Ok(Self::from_document(document))
    }

    /// Like [`open_path`](Self::open_path) but degrades to [`unavailable`](Self::unavailable) on error.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::open_path(path) {
            Ok(store) => {
                if store.is_available() {
                    tracing::info!(
                        path = %path.display(),
                        faqs = store.faq_count(),
                        "Knowledge base loaded successfully"
                    );
                } else {
                    tracing::warn!(path = %path.display(), "Knowledge base is empty");
                }
                store
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load knowledge base");
                Self::unavailable()
            }
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&KnowledgeBase> {
        self.document.as_ref()
    }

    pub fn faq_count(&self) -> usize {
        self.document.as_ref().map(|d| d.faqs.len()).unwrap_or(0)
    }

    /// Context string for the generative model; empty when the store is unavailable.
    pub fn context_summary(&self) -> String {
        self.document
            .as_ref()
            .map(KnowledgeBase::context_summary)
            .unwrap_or_default()
    }
}
