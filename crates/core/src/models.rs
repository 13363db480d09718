use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2:1b";
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 6_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCapture {
    pub url: String,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub max_chunk_chars: usize,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

impl ExtractionOptions {
    /// Reads `OLLAMA_MODEL` and `OLLAMA_URL` once, at the edge. The
    /// pipeline itself never consults the environment.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Some(model) = non_empty_env("OLLAMA_MODEL") {
            options.model = model;
        }
        if let Some(endpoint) = non_empty_env("OLLAMA_URL") {
            options.endpoint = endpoint;
        }

        options
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub proxy: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
