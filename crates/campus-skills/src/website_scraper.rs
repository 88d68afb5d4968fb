//! Website scraper: fetches a page with reqwest and extracts its visible text with scraper.

use campus_core::PageFetcher;
use scraper::{ElementRef, Html, Node};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Elements whose text is never shown to a reader.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Visible text of an HTML document: one stripped chunk per line, blank chunks dropped.
/// Runs of two spaces inside a line split it into separate chunks.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    raw.lines()
        .flat_map(|line| line.trim().split("  ").map(str::trim).collect::<Vec<_>>())
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    if HIDDEN_ELEMENTS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// First `max_chars` characters of `text`, with "..." appended when anything was cut.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// HTTP page fetcher with a browser-like User-Agent and a fixed timeout; no retries.
pub struct WebsiteScraper {
    client: reqwest::Client,
}

impl WebsiteScraper {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_html(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait::async_trait]
impl PageFetcher for WebsiteScraper {
    async fn fetch_text(&self, url: &str, max_chars: usize) -> Option<String> {
        match self.fetch_html(url).await {
            Ok(html) => Some(truncate_chars(&visible_text(&html), max_chars)),
            Err(e) => {
                tracing::warn!(url, error = %e, "Error scraping website");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_drops_scripts_and_blank_lines() {
        let html = r#"<html><head><title>SIT</title><style>body { color: red; }</style></head>
<body>
  <h1>Welcome to SIT</h1>
  <script>var x = 1;</script>
  <p>Admissions open   now</p>
  <noscript>Enable JS</noscript>
</body></html>"#;
        let text = visible_text(html);
        assert_eq!(text, "SIT\nWelcome to SIT\nAdmissions open\nnow");
    }

    #[test]
    fn test_truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello world", 5), "hello...");
        assert_eq!(truncate_chars("héllo wörld", 4), "héll...");
    }

    #[tokio::test]
    async fn test_unreachable_url_returns_none() {
        let scraper = WebsiteScraper::new(Duration::from_secs(1)).unwrap();
        assert_eq!(scraper.fetch_text("http://127.0.0.1:1/", 100).await, None);
    }
}
