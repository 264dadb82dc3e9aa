//! QA pipeline orchestrator: chunk → embed → index → retrieve → prompt →
//! generate, one answer per question.

use std::sync::Arc;

use tracing::debug;

use crate::pipeline::chunker::split;
use crate::pipeline::embedder::{Embedder, EmbeddingError};
use crate::pipeline::generator::AnswerGenerator;
use crate::pipeline::index::{EmbeddedChunk, IndexCache, VectorIndex};
use crate::pipeline::prompts::render_qa_prompt;
use crate::pipeline::retriever::retrieve;
use crate::pipeline::PipelineError;

/// Chunking and retrieval tunables. One instance per pipeline, so multiple
/// configurations can coexist in tests.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl PipelineConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 1000;
    pub const DEFAULT_CHUNK_OVERLAP: usize = 20;
    pub const DEFAULT_TOP_K: usize = 4;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            chunk_overlap: Self::DEFAULT_CHUNK_OVERLAP,
            top_k: Self::DEFAULT_TOP_K,
        }
    }
}

/// The QA pipeline. Holds its backends behind capability traits so tests run
/// against deterministic in-process stubs, never live services.
///
/// Beyond the two network calls (embedding, generation) and the index cache,
/// `answer_question` is side-effect-free; persisting the resulting QA record
/// is the route handler's job, and only after success.
#[derive(Clone)]
pub struct QaPipeline {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn AnswerGenerator>,
    config: PipelineConfig,
    cache: IndexCache,
}

impl QaPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn AnswerGenerator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            embedder,
            generator,
            config,
            cache: IndexCache::default(),
        }
    }

    /// Answers `question` from `document_text` alone. Any failure along the
    /// way aborts the call; no partial answer is returned.
    pub async fn answer_question(
        &self,
        document_text: &str,
        question: &str,
    ) -> Result<String, PipelineError> {
        let index = self.document_index(document_text).await?;
        let chunks = retrieve(
            self.embedder.as_ref(),
            &index,
            question,
            self.config.top_k,
        )
        .await?;

        let context = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = render_qa_prompt(&context, question);

        let answer = self.generator.generate(&prompt).await?;
        Ok(answer)
    }

    /// Returns the vector index for `document_text`, building and caching it
    /// on first sight. The cache key is the content hash, so a re-submitted
    /// résumé gets a fresh index.
    async fn document_index(&self, document_text: &str) -> Result<Arc<VectorIndex>, PipelineError> {
        let key = IndexCache::content_key(document_text);
        if let Some(index) = self.cache.get(key) {
            debug!("Index cache hit ({} entries)", index.len());
            return Ok(index);
        }

        let chunks = split(
            document_text,
            self.config.chunk_size,
            self.config.chunk_overlap,
        )?;
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embedder.embed(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::MismatchedResponse {
                expected: chunks.len(),
                got: vectors.len(),
            }
            .into());
        }

        let entries: Vec<EmbeddedChunk> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| EmbeddedChunk { chunk, vector })
            .collect();
        let index = Arc::new(VectorIndex::build(entries)?);
        debug!(
            "Built index: {} entries, {} dimensions",
            index.len(),
            index.dimensions()
        );

        self.cache.insert(key, Arc::clone(&index));
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic toy embedding: a letter-frequency histogram. Similar
    /// texts land near each other, and repeated runs are identical.
    fn histogram(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; 27];
        for c in text.to_ascii_lowercase().chars() {
            match c {
                'a'..='z' => v[(c as usize) - ('a' as usize)] += 1.0,
                '0'..='9' => v[26] += 1.0,
                _ => {}
            }
        }
        v
    }

    #[derive(Default)]
    struct CountingEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|t| histogram(t)).collect())
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Err(EmbeddingError::Api {
                status: 500,
                message: "quota exceeded".to_string(),
            })
        }
    }

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl AnswerGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    /// Echoes the prompt back, so tests can see what the generator was given.
    struct EchoGenerator;

    #[async_trait]
    impl AnswerGenerator for EchoGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            Ok(prompt.to_string())
        }
    }

    const DOC: &str = "Alice has 5 years of Go experience.";
    const QUESTION: &str = "How many years of experience?";

    fn pipeline(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> QaPipeline {
        QaPipeline::new(embedder, generator, PipelineConfig::default())
    }

    #[tokio::test]
    async fn test_stub_answer_returned_verbatim() {
        let p = pipeline(
            Arc::new(CountingEmbedder::default()),
            Arc::new(FixedGenerator("5 years")),
        );
        let answer = p.answer_question(DOC, QUESTION).await.unwrap();
        assert_eq!(answer, "5 years");
    }

    #[tokio::test]
    async fn test_prompt_contains_context_and_question() {
        let p = pipeline(
            Arc::new(CountingEmbedder::default()),
            Arc::new(EchoGenerator),
        );
        let prompt = p.answer_question(DOC, QUESTION).await.unwrap();
        assert!(prompt.starts_with("Answer the question based only on the following context:"));
        assert!(prompt.contains(DOC));
        assert!(prompt.ends_with(&format!("Question: {QUESTION}")));
    }

    #[tokio::test]
    async fn test_embedder_failure_propagates() {
        let p = pipeline(Arc::new(FailingEmbedder), Arc::new(FixedGenerator("unused")));
        let err = p.answer_question(DOC, QUESTION).await.unwrap_err();
        assert!(matches!(err, PipelineError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        struct FailingGenerator;

        #[async_trait]
        impl AnswerGenerator for FailingGenerator {
            async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
                Err(LlmError::EmptyContent)
            }
        }

        let p = pipeline(Arc::new(CountingEmbedder::default()), Arc::new(FailingGenerator));
        let err = p.answer_question(DOC, QUESTION).await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(_)));
    }

    #[tokio::test]
    async fn test_identical_inputs_yield_identical_answers() {
        let p = pipeline(
            Arc::new(CountingEmbedder::default()),
            Arc::new(EchoGenerator),
        );
        let first = p.answer_question(DOC, QUESTION).await.unwrap();
        let second = p.answer_question(DOC, QUESTION).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cached_index_skips_reembedding() {
        let embedder = Arc::new(CountingEmbedder::default());
        let p = pipeline(embedder.clone(), Arc::new(FixedGenerator("ok")));

        // First call embeds the document batch and the question.
        p.answer_question(DOC, QUESTION).await.unwrap();
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 2);

        // Second call hits the index cache; only the question is embedded.
        p.answer_question(DOC, QUESTION).await.unwrap();
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);

        // A changed document misses the cache and re-embeds.
        p.answer_question("Bob has 2 years of Rust.", QUESTION)
            .await
            .unwrap();
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_bad_chunk_config_rejected() {
        let config = PipelineConfig {
            chunk_size: 10,
            chunk_overlap: 10,
            top_k: 4,
        };
        let p = QaPipeline::new(
            Arc::new(CountingEmbedder::default()),
            Arc::new(FixedGenerator("unused")),
            config,
        );
        let err = p.answer_question(DOC, QUESTION).await.unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
