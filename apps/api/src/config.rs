use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub embeddings_api_url: String,
    pub embeddings_api_key: String,
    pub embeddings_model: String,
    /// Keywords stripped by the redaction pass. Overlaps with, but is not
    /// identical to, the detection pattern set in `bias` — keep them separate.
    pub sensitive_keywords: Vec<String>,
    /// Cosine similarity above which a required skill counts as matched.
    pub similarity_threshold: f32,
    pub model_state_path: String,
    pub critique_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_EMBEDDINGS_API_URL: &str = "https://api.openai.com/v1/embeddings";
const DEFAULT_EMBEDDINGS_MODEL: &str = "text-embedding-3-small";

const DEFAULT_SENSITIVE_KEYWORDS: &[&str] = &[
    "male",
    "female",
    "gender",
    "age",
    "religion",
    "muslim",
    "christian",
    "hindu",
    "married",
    "single",
    "divorced",
    "pregnant",
    "disability",
];

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            embeddings_api_url: std::env::var("EMBEDDINGS_API_URL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDINGS_API_URL.to_string()),
            embeddings_api_key: require_env("EMBEDDINGS_API_KEY")?,
            embeddings_model: std::env::var("EMBEDDINGS_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDINGS_MODEL.to_string()),
            sensitive_keywords: sensitive_keywords_from_env(),
            similarity_threshold: std::env::var("SIMILARITY_THRESHOLD")
                .unwrap_or_else(|_| "0.7".to_string())
                .parse::<f32>()
                .context("SIMILARITY_THRESHOLD must be a number")?,
            model_state_path: std::env::var("MODEL_STATE_PATH")
                .unwrap_or_else(|_| "models/suitability.json".to_string()),
            critique_timeout_secs: std::env::var("CRITIQUE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("CRITIQUE_TIMEOUT_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn sensitive_keywords_from_env() -> Vec<String> {
    match std::env::var("SENSITIVE_KEYWORDS") {
        Ok(raw) => raw
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect(),
        Err(_) => DEFAULT_SENSITIVE_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect(),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
