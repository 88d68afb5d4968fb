//! Answers "what is your website" and "tell me about the college" style queries.

use super::matching::{contains_any, MatchMode};
use crate::knowledge::KnowledgeBase;
use std::sync::Arc;

const WEBSITE_TERMS: [&str; 4] = ["website", "site", "url", "link"];
const ABOUT_COLLEGE_TERMS: [&str; 5] = [
    "college detail",
    "about college",
    "college info",
    "tell me about",
    "what is sit",
];

/// Fetches the visible text of a web page.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Visible text of `url`, at most `max_chars` characters (ellipsis-terminated when truncated).
    /// `None` on any fetch or parse failure.
    async fn fetch_text(&self, url: &str, max_chars: usize) -> Option<String>;
}

pub struct WebsiteInfoResolver {
    fetcher: Arc<dyn PageFetcher>,
    preview_chars: usize,
    mode: MatchMode,
}

impl WebsiteInfoResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, preview_chars: usize, mode: MatchMode) -> Self {
        Self {
            fetcher,
            preview_chars,
            mode,
        }
    }

    pub async fn resolve(&self, query: &str, kb: &KnowledgeBase) -> Option<String> {
        let info = kb.college_info.as_ref()?;
        let website = info.website().unwrap_or("");
        let query_lower = query.to_lowercase();

        if contains_any(&query_lower, &WEBSITE_TERMS, self.mode) {
            let mut response = format!("Our official college website is: {}", website);
            let links: Vec<String> = [
                ("Admissions", info.admissions_url()),
                ("Courses", info.courses_url()),
                ("Contact", info.contact_url()),
            ]
            .into_iter()
            .filter_map(|(label, url)| url.map(|u| format!("• {}: {}", label, u)))
            .collect();
            if !links.is_empty() {
                response.push_str("\n\nYou can find detailed information about:\n");
                response.push_str(&links.join("\n"));
            }
            return Some(response);
        }

        if contains_any(&query_lower, &ABOUT_COLLEGE_TERMS, self.mode) {
            let mut response = format!(
                "Here are the details about {}:\n\n🌐 Official Website: {}\n\n",
                info.name().unwrap_or("our college"),
                website
            );
            if !website.is_empty() {
                match self.fetcher.fetch_text(website, self.preview_chars).await {
                    Some(preview) if !preview.is_empty() => {
                        response.push_str(&format!("Website Content Preview:\n{}\n\n", preview));
                    }
                    _ => tracing::debug!(url = website, "No website preview available"),
                }
            }
            response.push_str(&format!(
                "For more detailed information, please visit: {}",
                website
            ));
            return Some(response);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::CollegeInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeFetcher {
        text: Option<String>,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn new(text: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                text: text.map(str::to_string),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch_text(&self, _url: &str, _max_chars: usize) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text.clone()
        }
    }

    fn kb() -> KnowledgeBase {
        KnowledgeBase {
            college_info: Some(CollegeInfo {
                name: Some("SIT".to_string()),
                website: Some("https://sit.example.edu".to_string()),
                admissions_url: Some("https://sit.example.edu/admissions".to_string()),
                courses_url: None,
                contact_url: Some("https://sit.example.edu/contact".to_string()),
            }),
            ..Default::default()
        }
    }

    fn resolver(fetcher: Arc<FakeFetcher>) -> WebsiteInfoResolver {
        WebsiteInfoResolver::new(fetcher, 1000, MatchMode::Substring)
    }

    #[tokio::test]
    async fn test_website_query_lists_links() {
        let resolver = resolver(FakeFetcher::new(None));
        let answer = resolver.resolve("what is your website?", &kb()).await.unwrap();
        assert!(answer.contains("https://sit.example.edu"));
        assert!(answer.contains("• Admissions: https://sit.example.edu/admissions"));
        assert!(answer.contains("• Contact: https://sit.example.edu/contact"));
        assert!(!answer.contains("Courses"));
    }

    #[tokio::test]
    async fn test_website_template_emitted_without_website() {
        let resolver = resolver(FakeFetcher::new(None));
        let kb = KnowledgeBase {
            college_info: Some(CollegeInfo::default()),
            ..Default::default()
        };
        let answer = resolver.resolve("send me the link", &kb).await.unwrap();
        assert_eq!(answer, "Our official college website is: ");
    }

    #[tokio::test]
    async fn test_no_college_info_returns_none() {
        let resolver = resolver(FakeFetcher::new(None));
        let answer = resolver.resolve("website please", &KnowledgeBase::default()).await;
        assert_eq!(answer, None);
    }

    #[tokio::test]
    async fn test_about_college_includes_preview() {
        let fetcher = FakeFetcher::new(Some("Welcome to SIT..."));
        let resolver = resolver(Arc::clone(&fetcher));
        let answer = resolver.resolve("Tell me about SIT", &kb()).await.unwrap();
        assert!(answer.starts_with("Here are the details about SIT:"));
        assert!(answer.contains("Website Content Preview:\nWelcome to SIT..."));
        assert!(answer.ends_with("please visit: https://sit.example.edu"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_about_college_scrape_failure_is_silent() {
        let resolver = resolver(FakeFetcher::new(None));
        let answer = resolver.resolve("tell me about the campus", &kb()).await.unwrap();
        assert!(!answer.contains("Preview"));
        assert!(answer.ends_with("please visit: https://sit.example.edu"));
    }

    #[tokio::test]
    async fn test_unrelated_query_returns_none() {
        let resolver = resolver(FakeFetcher::new(None));
        assert_eq!(resolver.resolve("hostel fees", &kb()).await, None);
    }
}
