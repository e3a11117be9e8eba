//! Environment-driven configuration.
//!
//! Values are read once at startup and passed explicitly into constructors;
//! nothing in the core reads process-wide state afterwards. Invalid sizes
//! (zero chunk size, zero dimension) are rejected by the constructors they
//! parameterize, not here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory of plain-text source documents.
    pub docs_path: PathBuf,
    /// Path of the persisted vector store JSON file.
    pub store_path: PathBuf,
    /// Maximum chunk size in code points.
    pub chunk_size: usize,
    /// Overlap budget in code points.
    pub chunk_overlap: usize,
    /// Number of results returned per query.
    pub top_k: usize,
    /// Embedding dimension.
    pub embedding_dim: usize,
}

impl AppConfig {
    /// Read configuration from the environment, with defaults.
    pub fn from_env() -> Self {
        Self {
            docs_path: PathBuf::from(env_or("DOCS_PATH", "docs")),
            store_path: PathBuf::from(env_or("VECTOR_STORE_PATH", "data/vector_store.json")),
            chunk_size: env_parse("CHUNK_SIZE", 500),
            chunk_overlap: env_parse("CHUNK_OVERLAP", 50),
            top_k: env_parse("TOP_K", 3),
            embedding_dim: env_parse("EMBEDDING_DIM", 300),
        }
    }
}

/// Answer-generation (Ollama) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "local" enables the Ollama client; anything else uses the rule-based fallback.
    pub mode: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl LlmConfig {
    /// Read LLM configuration from the environment, with defaults.
    pub fn from_env() -> Self {
        Self {
            mode: env_or("LLM_MODE", "local"),
            model: env_or("OLLAMA_MODEL", "qwen2.5:7b"),
            base_url: env_or("OLLAMA_BASE_URL", "http://localhost:11434"),
            temperature: env_parse("LLM_TEMPERATURE", 0.7),
            max_tokens: env_parse("MAX_TOKENS", 1024),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
