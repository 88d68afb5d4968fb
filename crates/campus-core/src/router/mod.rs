//! Response routing: answer from local knowledge when possible, otherwise delegate to the
//! generative model.
//!
//! Order per query: website resolver → keyword search → college-specific check →
//! external AI with the knowledge base summary as context.

mod classifier;
mod matching;
mod search;
mod website;

pub use classifier::{is_college_specific, COLLEGE_KEYWORDS};
pub use matching::{contains_term, MatchMode};
pub use search::KnowledgeSearcher;
pub use website::{PageFetcher, WebsiteInfoResolver};

use crate::knowledge::KnowledgeStore;
use crate::retry::RetryPolicy;
use std::sync::Arc;

/// Returned when the generative model has no credential configured.
pub const DEGRADED_MESSAGE: &str = "I apologize, but I'm currently operating with limited capabilities. I can help you with questions about admissions, exams, and placements using our college database.";

/// Returned when the generative model produced no text.
pub const EMPTY_RESPONSE_MESSAGE: &str =
    "I apologize, but I cannot generate a response to that query. Please try rephrasing your question.";

/// Returned when the generative model keeps failing after all retries.
pub const UNAVAILABLE_MESSAGE: &str = "I'm having trouble accessing my advanced capabilities right now, but I can still help with college-specific questions.";

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("generative model API key not configured")]
    MissingCredential,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("empty response from generative model")]
    EmptyResponse,
}

impl AiError {
    /// Transport and API failures are retried; configuration and empty output are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Api { .. })
    }
}

/// Generative model collaborator: query plus knowledge context in, trimmed text out.
#[async_trait::async_trait]
pub trait ExternalAi: Send + Sync {
    async fn generate(&self, query: &str, context: &str) -> Result<String, AiError>;
}

/// Stateless per call; the knowledge store is shared read-only.
pub struct ResponseRouter {
    knowledge: Arc<KnowledgeStore>,
    website: WebsiteInfoResolver,
    searcher: KnowledgeSearcher,
    ai: Arc<dyn ExternalAi>,
    retry: RetryPolicy,
    mode: MatchMode,
}

impl ResponseRouter {
    pub fn new(
        knowledge: Arc<KnowledgeStore>,
        ai: Arc<dyn ExternalAi>,
        fetcher: Arc<dyn PageFetcher>,
        preview_chars: usize,
        retry: RetryPolicy,
        mode: MatchMode,
    ) -> Self {
        Self {
            knowledge,
            website: WebsiteInfoResolver::new(fetcher, preview_chars, mode),
            searcher: KnowledgeSearcher::new(mode),
            ai,
            retry,
            mode,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    /// Local answer from the website resolver or the searcher, if any.
    pub async fn local_answer(&self, query: &str) -> Option<String> {
        let kb = self.knowledge.document()?;
        match self.website.resolve(query, kb).await {
            Some(answer) => Some(answer),
            None => self.searcher.search(query, kb),
        }
    }

    pub async fn route(&self, query: &str) -> String {
        if let Some(answer) = self.local_answer(query).await {
            if is_college_specific(query, self.mode) {
                tracing::info!("Using knowledge base response");
                return answer;
            }
        }

        let context = self.knowledge.context_summary();
        tracing::info!("Using generative model response with knowledge context");
        self.generate(query, &context).await
    }

    async fn generate(&self, query: &str, context: &str) -> String {
        let ai = Arc::clone(&self.ai);
        let result = self
            .retry
            .run(|| ai.generate(query, context), AiError::is_retryable)
            .await;
        match result {
            Ok(text) => text,
            Err(AiError::MissingCredential) => {
                tracing::warn!("Generative model API key not found");
                DEGRADED_MESSAGE.to_string()
            }
            Err(AiError::EmptyResponse) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Generative model unavailable");
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }
}
