//! Embedding capability interface and the Cohere-backed production impl.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const COHERE_API_URL: &str = "https://api.cohere.ai/v1/embed";
/// The embedding model used for both document chunks and queries.
pub const EMBED_MODEL: &str = "embed-english-v3.0";
const INPUT_TYPE: &str = "search_document";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Backend returned {got} embeddings for {expected} inputs")]
    MismatchedResponse { expected: usize, got: usize },
}

/// Maps text to fixed-length vectors, one per input, in input order.
///
/// Deterministic per backend/version, but callers must not assume exact
/// vector stability across backend versions.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct CohereRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    input_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct CohereResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct CohereError {
    message: String,
}

/// Production embedder against the Cohere Embed API.
/// Retries on 429 and 5xx with exponential backoff, like the LLM client.
#[derive(Clone)]
pub struct CohereEmbedder {
    client: Client,
    api_key: String,
}

impl CohereEmbedder {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl Embedder for CohereEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request_body = CohereRequest {
            model: EMBED_MODEL,
            texts,
            input_type: INPUT_TYPE,
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(COHERE_API_URL)
                .bearer_auth(&self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<CohereError>(&body)
                    .map(|e| e.message)
                    .unwrap_or(body);
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: CohereResponse = response.json().await?;
            if parsed.embeddings.len() != texts.len() {
                return Err(EmbeddingError::MismatchedResponse {
                    expected: texts.len(),
                    got: parsed.embeddings.len(),
                });
            }

            debug!("Embedded {} texts", texts.len());
            return Ok(parsed.embeddings);
        }

        Err(last_error.unwrap_or(EmbeddingError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}
