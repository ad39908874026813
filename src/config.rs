use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider selector: "openai" uses the API when a key is present,
    /// anything else (or a missing key) selects the local model.
    pub provider: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub serpapi_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub doc_dir: PathBuf,
    pub chunk_size: usize,
}

impl Config {
    /// Load configuration from the environment, once at startup.
    ///
    /// Every provider credential is optional: absence selects that
    /// component's documented fallback rather than an error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            embedding: EmbeddingConfig {
                provider: env::var("EMBED_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                model: env::var("EMBED_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
                timeout_secs: env::var("EMBED_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()?,
                max_retries: env::var("EMBED_MAX_RETRIES")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()?,
            },
            llm: LlmConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                timeout_secs: env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()?,
            },
            search: SearchConfig {
                serpapi_key: env::var("SERP_API_KEY").unwrap_or_default(),
                timeout_secs: env::var("SEARCH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()?,
            },
            storage: StorageConfig {
                doc_dir: env::var("DOC_DIR")
                    .unwrap_or_else(|_| "data/docs".to_string())
                    .into(),
                chunk_size: env::var("CHUNK_SIZE")
                    .unwrap_or_else(|_| "1200".to_string())
                    .parse()?,
            },
        })
    }
}
