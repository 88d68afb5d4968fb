//! Concrete collaborators for the campus assistant router.

pub use campus_core::{ExternalAi, PageFetcher};

pub mod ingest;
mod model_router;
mod website_scraper;

pub use ingest::{build_records, extract_text, write_records, DocumentRecord, IngestError};
pub use model_router::{build_prompt, ModelRouter};
pub use website_scraper::{visible_text, WebsiteScraper};
