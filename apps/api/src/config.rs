use anyhow::{Context, Result};

use crate::pipeline::PipelineConfig;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub cohere_api_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Chunking and retrieval tunables, handed to the QA pipeline at startup.
    pub pipeline: PipelineConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            cohere_api_key: require_env("COHERE_API_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            pipeline: PipelineConfig {
                chunk_size: env_usize("CHUNK_SIZE", PipelineConfig::DEFAULT_CHUNK_SIZE)?,
                chunk_overlap: env_usize("CHUNK_OVERLAP", PipelineConfig::DEFAULT_CHUNK_OVERLAP)?,
                top_k: env_usize("RETRIEVAL_TOP_K", PipelineConfig::DEFAULT_TOP_K)?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
