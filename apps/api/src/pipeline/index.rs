//! In-memory nearest-neighbor index over embedded chunks, plus the
//! content-hash cache that lets repeat questions against an unchanged résumé
//! skip re-embedding.

use std::collections::HashMap;
use std::hash::Hasher;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use twox_hash::XxHash64;

use crate::pipeline::chunker::Chunk;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Cannot build an index from zero entries")]
    Empty,

    #[error("Vector dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// A chunk paired with its embedding vector. All vectors in one index share
/// the same dimensionality.
#[derive(Debug, Clone)]
pub struct EmbeddedChunk {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

/// Brute-force cosine-similarity index. Read-only after `build`; rebuilding
/// is the only way to add data.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<EmbeddedChunk>,
    dimensions: usize,
}

impl VectorIndex {
    /// Takes ownership of the entries for the lifetime of the index.
    /// Rejects zero entries and mixed dimensionality.
    pub fn build(entries: Vec<EmbeddedChunk>) -> Result<Self, IndexError> {
        let dimensions = entries.first().ok_or(IndexError::Empty)?.vector.len();
        for entry in &entries {
            if entry.vector.len() != dimensions {
                return Err(IndexError::DimensionMismatch {
                    expected: dimensions,
                    got: entry.vector.len(),
                });
            }
        }
        Ok(Self {
            entries,
            dimensions,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Returns the `k` most similar chunks by cosine similarity, ranked
    /// descending. `k` is clamped to the entry count. Ties keep insertion
    /// order (the sort is stable).
    ///
    /// The query vector must come from the same embedder that produced the
    /// entries.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(&Chunk, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .take(k.min(self.entries.len()))
            .map(|(i, score)| (&self.entries[i].chunk, score))
            .collect()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

/// Shared cache of built indexes keyed by document content hash.
///
/// Re-submitting a résumé changes the text, hence the key, so stale indexes
/// are simply never looked up again.
#[derive(Clone, Default)]
pub struct IndexCache {
    inner: Arc<RwLock<HashMap<u64, Arc<VectorIndex>>>>,
}

impl IndexCache {
    pub fn content_key(text: &str) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(text.as_bytes());
        hasher.finish()
    }

    pub fn get(&self, key: u64) -> Option<Arc<VectorIndex>> {
        self.inner
            .read()
            .ok()
            .and_then(|cache| cache.get(&key).cloned())
    }

    pub fn insert(&self, key: u64, index: Arc<VectorIndex>) {
        if let Ok(mut cache) = self.inner.write() {
            cache.insert(key, index);
        }
    }
}
