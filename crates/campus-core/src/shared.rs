//! Shared configuration used by the gateway, the ingest tool and the skills crate.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Mode for the generative model client: mock (deterministic local text) or live (Gemini API).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmMode {
    Mock,
    #[default]
    Live,
}

/// Global application configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown by the status endpoint.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Path to the prepared knowledge base JSON document.
    pub knowledge_base_path: String,
    /// LLM mode ("mock" or "live").
    pub llm_mode: LlmMode,
    /// Gemini model name used in live mode.
    pub gemini_model: String,
    /// Persona name used in the generation prompt.
    pub assistant_name: String,
    /// Queries longer than this (in characters) are answered with a fixed "please shorten" message.
    pub max_query_chars: usize,
    pub scrape_timeout_secs: u64,
    /// Maximum characters of scraped website text included in "about college" answers.
    pub scrape_preview_chars: usize,
    /// Retries after the first failed generation attempt (transport/API failures only).
    pub ai_max_retries: u32,
    /// Base delay for exponential backoff between generation retries.
    pub ai_backoff_base_ms: u64,
    /// Upper bound on a whole routing call, enforced by the gateway.
    pub request_timeout_secs: u64,
    /// If true, keyword matching requires whole words instead of substrings.
    #[serde(default)]
    pub whole_word_matching: bool,
    /// If true, the gateway serves the chat page from `campus-frontend/`.
    #[serde(default)]
    pub frontend_enabled: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "Campus Assistant".to_string(),
            port: 8000,
            knowledge_base_path: "ChatBot/knowledge_base.json".to_string(),
            llm_mode: LlmMode::Live,
            gemini_model: "gemini-2.0-flash-exp".to_string(),
            assistant_name: "JARVIS".to_string(),
            max_query_chars: 500,
            scrape_timeout_secs: 10,
            scrape_preview_chars: 1000,
            ai_max_retries: 2,
            ai_backoff_base_ms: 1000,
            request_timeout_secs: 60,
            whole_word_matching: false,
            frontend_enabled: false,
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `CAMPUS_*` > file at `CAMPUS_CONFIG`
    /// (default `config/gateway.toml`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CAMPUS_CONFIG").unwrap_or_else(|_| "config/gateway.toml".to_string());
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("knowledge_base_path", defaults.knowledge_base_path)?
            .set_default("llm_mode", "live")?
            .set_default("gemini_model", defaults.gemini_model)?
            .set_default("assistant_name", defaults.assistant_name)?
            .set_default("max_query_chars", defaults.max_query_chars as i64)?
            .set_default("scrape_timeout_secs", defaults.scrape_timeout_secs as i64)?
            .set_default("scrape_preview_chars", defaults.scrape_preview_chars as i64)?
            .set_default("ai_max_retries", i64::from(defaults.ai_max_retries))?
            .set_default("ai_backoff_base_ms", defaults.ai_backoff_base_ms as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("whole_word_matching", defaults.whole_word_matching)?
            .set_default("frontend_enabled", defaults.frontend_enabled)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("CAMPUS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        built.try_deserialize()
    }

    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_secs(self.scrape_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn ai_backoff_base(&self) -> Duration {
        Duration::from_millis(self.ai_backoff_base_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_limits() {
        let config = CoreConfig::default();
        assert_eq!(config.max_query_chars, 500);
        assert_eq!(config.scrape_timeout(), Duration::from_secs(10));
        assert_eq!(config.ai_max_retries, 2);
        assert_eq!(config.ai_backoff_base(), Duration::from_secs(1));
        assert!(!config.whole_word_matching);
        assert!(!config.frontend_enabled);
    }

    #[test]
    fn test_load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.toml");
        std::fs::write(
            &path,
            "app_name = \"SIT Helpdesk\"\nport = 9100\nllm_mode = \"mock\"\nwhole_word_matching = true\nfrontend_enabled = true\n",
        )
        .unwrap();
        std::env::set_var("CAMPUS_CONFIG", &path);
        let config = CoreConfig::load().unwrap();
        std::env::remove_var("CAMPUS_CONFIG");

        assert_eq!(config.app_name, "SIT Helpdesk");
        assert_eq!(config.port, 9100);
        assert_eq!(config.llm_mode, LlmMode::Mock);
        assert!(config.whole_word_matching);
        assert!(config.frontend_enabled);
        assert_eq!(config.max_query_chars, 500);
    }
}
