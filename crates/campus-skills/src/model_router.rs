//! Model Router: sends the user question plus knowledge context to Gemini (or a mock) and returns generated text.

use campus_core::{AiError, CoreConfig, ExternalAi, LlmMode};
use serde::Deserialize;

const ENV_API_KEYS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Builds the generation prompt: persona, knowledge context, website guidance, then the question.
pub fn build_prompt(assistant_name: &str, query: &str, context: &str) -> String {
    format!(
        "You are {assistant_name}, an AI assistant for the college. You are professional, helpful, and consistent in your responses.\n\
         Always address users respectfully as 'Sir' or 'Madam'.\n\n\
         College Information Context:\n{context}\n\n\
         When users ask for college details or more information, always mention the official website and encourage them to visit it.\n\
         If you don't have specific information, suggest they check the college website.\n\n\
         User Question: {query}\n\n\
         Provide intelligent, conversational responses. Include website links when relevant."
    )
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenated, trimmed text of the first candidate.
fn parse_generation(body: &str) -> Result<String, AiError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| AiError::Transport(format!("invalid response body: {}", e)))?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Routes a prompt to a mock generator or the live Gemini `generateContent` API.
pub struct ModelRouter {
    mode: LlmMode,
    model: String,
    assistant_name: String,
    api_key: Option<String>,
    api_base: String,
    client: reqwest::Client,
}

impl ModelRouter {
    /// Live or mock according to `config`; the API key comes from the environment.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self {
            mode: config.llm_mode,
            model: config.gemini_model.clone(),
            assistant_name: config.assistant_name.clone(),
            api_key: api_key_from_env(),
            api_base: DEFAULT_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_mode(mode: LlmMode) -> Self {
        Self {
            mode,
            model: DEFAULT_MODEL.to_string(),
            assistant_name: "JARVIS".to_string(),
            api_key: api_key_from_env(),
            api_base: DEFAULT_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn mode(&self) -> LlmMode {
        self.mode
    }

    /// Mock LLM: deterministic "generated" text that echoes a preview of the question.
    fn mock_generate(&self, query: &str) -> String {
        let preview = query
            .chars()
            .take(80)
            .chain(if query.chars().count() > 80 { "…" } else { "" }.chars())
            .collect::<String>();
        format!(
            "[Generated – Mock LLM]\n\nThank you for your question ({}). For complete and up-to-date details, please check the official college website.",
            preview
        )
    }

    async fn live_generate(&self, query: &str, context: &str) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingCredential)?;
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": build_prompt(&self.assistant_name, query, context) }]
            }],
            "generationConfig": {
                "temperature": 0.3,
                "maxOutputTokens": 400,
                "topP": 0.9,
                "topK": 40,
                "candidateCount": 1
            },
            "safetySettings": [
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" }
            ]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(AiError::Api {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }
        parse_generation(&text)
    }
}

fn api_key_from_env() -> Option<String> {
    ENV_API_KEYS
        .iter()
        .find_map(|k| std::env::var(k).ok())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[async_trait::async_trait]
impl ExternalAi for ModelRouter {
    async fn generate(&self, query: &str, context: &str) -> Result<String, AiError> {
        match self.mode {
            LlmMode::Mock => Ok(self.mock_generate(query)),
            LlmMode::Live => self.live_generate(query, context).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_persona_context_and_question() {
        let prompt = build_prompt("JARVIS", "When do exams start?", "College Website: https://x.edu");
        assert!(prompt.starts_with("You are JARVIS"));
        assert!(prompt.contains("College Information Context:\nCollege Website: https://x.edu"));
        assert!(prompt.contains("User Question: When do exams start?"));
    }

    #[test]
    fn test_parse_generation_trims_first_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  Hello, "},{"text":"Sir.\n"}]}}]}"#;
        assert_eq!(parse_generation(body).unwrap(), "Hello, Sir.");
    }

    #[test]
    fn test_parse_generation_blank_is_empty_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#;
        assert!(matches!(parse_generation(body), Err(AiError::EmptyResponse)));
        assert!(matches!(parse_generation("{}"), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn test_parse_generation_garbage_is_transport_error() {
        assert!(matches!(parse_generation("<html>"), Err(AiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_live_without_key_is_missing_credential() {
        let router = ModelRouter::with_mode(LlmMode::Live).with_api_key(None);
        let err = router.generate("hi", "").await.unwrap_err();
        assert!(matches!(err, AiError::MissingCredential));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_mock_generates_deterministic_text() {
        let router = ModelRouter::with_mode(LlmMode::Mock);
        let a = router.generate("Tell me a joke", "").await.unwrap();
        let b = router.generate("Tell me a joke", "ctx").await.unwrap();
        assert_eq!(a, b);
        assert!(a.contains("Tell me a joke"));
    }
}
