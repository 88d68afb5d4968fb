//! campus-core: knowledge base model, keyword search and query routing for the campus assistant.
//!
//! Network-facing collaborators (the generative model and the website scraper) are
//! abstracted behind [`ExternalAi`] and [`PageFetcher`]; concrete clients live in
//! `campus-skills`.

mod knowledge;
mod retry;
mod router;
mod shared;

// Shared
pub use shared::{CoreConfig, LlmMode};

// Knowledge base
pub use knowledge::{
    Admissions, CollegeInfo, Exams, Faq, KnowledgeBase, KnowledgeError, KnowledgeStore,
    Placements, NOT_AVAILABLE,
};

// Retry
pub use retry::RetryPolicy;

// Routing
pub use router::{
    contains_term, is_college_specific, AiError, ExternalAi, KnowledgeSearcher, MatchMode,
    PageFetcher, ResponseRouter, WebsiteInfoResolver, COLLEGE_KEYWORDS, DEGRADED_MESSAGE,
    EMPTY_RESPONSE_MESSAGE, UNAVAILABLE_MESSAGE,
};
