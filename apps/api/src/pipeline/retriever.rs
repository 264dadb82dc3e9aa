//! Embeds a question and pulls the most similar chunks out of the index.

use crate::pipeline::chunker::Chunk;
use crate::pipeline::embedder::{Embedder, EmbeddingError};
use crate::pipeline::index::VectorIndex;
use crate::pipeline::PipelineError;

/// Returns the top-`k` chunks for `question`, most similar first.
/// Scores are an internal ranking signal and are dropped here; the prompt
/// only ever sees chunk content.
pub async fn retrieve(
    embedder: &dyn Embedder,
    index: &VectorIndex,
    question: &str,
    k: usize,
) -> Result<Vec<Chunk>, PipelineError> {
    let vectors = embedder.embed(&[question.to_string()]).await?;
    let query = vectors
        .into_iter()
        .next()
        .ok_or(EmbeddingError::MismatchedResponse {
            expected: 1,
            got: 0,
        })?;

    Ok(index
        .search(&query, k)
        .into_iter()
        .map(|(chunk, _score)| chunk.clone())
        .collect())
}
