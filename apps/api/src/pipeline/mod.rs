//! The retrieval-augmented QA pipeline: chunking, embedding, in-memory vector
//! search and templated answer generation.

pub mod answerer;
pub mod chunker;
pub mod embedder;
pub mod generator;
pub mod handlers;
pub mod index;
pub mod prompts;
pub mod retriever;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::pipeline::embedder::EmbeddingError;
use crate::pipeline::index::IndexError;

pub use answerer::{PipelineConfig, QaPipeline};

/// First failure anywhere in the pipeline aborts the whole QA request;
/// no partial answer is ever returned.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid chunking configuration: {0}")]
    Config(String),

    #[error("Embedding backend error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Generation backend error: {0}")]
    Generation(#[from] LlmError),

    #[error("Vector index error: {0}")]
    Index(#[from] IndexError),
}
