//! Axum-based gateway for the campus assistant. Config-driven via CoreConfig.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use campus_core::{
    CoreConfig, ExternalAi, KnowledgeStore, MatchMode, PageFetcher, ResponseRouter, RetryPolicy,
};
use campus_skills::{ModelRouter, WebsiteScraper};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NO_QUERY: &str = "No query provided";
const INVALID_JSON: &str = "Invalid JSON format in request";
const POST_ONLY: &str = "Only POST method allowed";
const TECHNICAL_ISSUE: &str = "I apologize, but I encountered a technical issue. Please try rephrasing your question or ask about our college admissions, exams, or placement information.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[campus-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load()?);
    let knowledge = Arc::new(KnowledgeStore::load(&config.knowledge_base_path));
    let ai: Arc<dyn ExternalAi> = Arc::new(ModelRouter::from_config(&config));
    let fetcher: Arc<dyn PageFetcher> = Arc::new(WebsiteScraper::new(config.scrape_timeout())?);
    let router = Arc::new(ResponseRouter::new(
        knowledge,
        ai,
        fetcher,
        config.scrape_preview_chars,
        RetryPolicy::new(config.ai_max_retries, config.ai_backoff_base()),
        MatchMode::from_whole_word(config.whole_word_matching),
    ));

    let app = build_app(AppState {
        config: Arc::clone(&config),
        router,
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("{} listening on {}", config.app_name, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) router: Arc<ResponseRouter>,
}

fn frontend_root_dir() -> std::path::PathBuf {
    // Run from the workspace root in development; otherwise resolve relative to this crate.
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let from_cwd = cwd.join("campus-frontend");
    if from_cwd.exists() {
        return from_cwd;
    }

    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("campus-frontend")
}

fn build_app(state: AppState) -> Router {
    let frontend_enabled = state.config.frontend_enabled;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/chatbot/", post(chatbot).fallback(method_not_allowed))
        .route("/api/v1/health", get(health))
        .route("/api/v1/status", get(status))
        .with_state(state);

    if frontend_enabled {
        let frontend_dir = frontend_root_dir();
        // `/` -> chat page, `/assets/*` -> its script and stylesheet
        app = app
            .route_service("/", ServeFile::new(frontend_dir.join("index.html")))
            .nest_service("/assets", ServeDir::new(frontend_dir.join("assets")));
    }

    app.layer(cors)
}

#[derive(serde::Deserialize)]
struct ChatRequest {
    #[serde(default)]
    query: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn chat_response(text: &str) -> Response {
    Json(serde_json::json!({ "response": text })).into_response()
}

/// POST /chatbot/ – answers `{query}` from the knowledge base or the generative model.
async fn chatbot(State(state): State<AppState>, body: Bytes) -> Response {
    let req: ChatRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(error = %e, "Invalid JSON in request body");
            return error_response(StatusCode::BAD_REQUEST, INVALID_JSON);
        }
    };

    let query = req.query.trim().to_string();
    if query.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, NO_QUERY);
    }
    let max_chars = state.config.max_query_chars;
    if query.chars().count() > max_chars {
        return chat_response(&format!(
            "Please keep your question under {} characters for better processing.",
            max_chars
        ));
    }

    tracing::info!(chars = query.chars().count(), "User query: {}", query);

    // Routing runs in its own task so a panic or an overrun becomes an apology instead of a fault.
    let router = Arc::clone(&state.router);
    let task = tokio::spawn(async move { router.route(&query).await });
    let abort = task.abort_handle();
    let response = match tokio::time::timeout(state.config.request_timeout(), task).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Unexpected error while routing query");
            TECHNICAL_ISSUE.to_string()
        }
        Err(_) => {
            abort.abort();
            tracing::error!(
                timeout_secs = state.config.request_timeout_secs,
                "Routing timed out"
            );
            TECHNICAL_ISSUE.to_string()
        }
    };

    let preview: String = response.chars().take(100).collect();
    tracing::info!("Bot response: {}...", preview);
    chat_response(&response)
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, POST_ONLY)
}

/// GET /api/v1/health – liveness check.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/v1/status – app identity and knowledge base state.
async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let knowledge = state.router.knowledge();
    Json(serde_json::json!({
        "app_name": state.config.app_name,
        "llm_mode": state.config.llm_mode,
        "knowledge_base_loaded": knowledge.is_available(),
        "faq_count": knowledge.faq_count(),
    }))
}
