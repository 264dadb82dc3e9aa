//! Splits raw document text into overlapping fixed-size segments.

use serde_json::{json, Value};

use crate::pipeline::PipelineError;

/// A loaded source document, immutable once created.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub metadata: Value,
}

/// A contiguous slice of a document's text used as a retrieval unit.
/// Ordering among chunks from the same document is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub content: String,
    pub metadata: Value,
}

/// Splits `text` into chunks of at most `chunk_size` characters, where each
/// chunk after the first starts `overlap` characters before the end of its
/// predecessor. Counts are in characters and cuts always land on `char`
/// boundaries. Text shorter than `chunk_size` yields a single chunk equal to
/// the whole text.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>, PipelineError> {
    if chunk_size == 0 {
        return Err(PipelineError::Config(
            "chunk_size must be greater than zero".to_string(),
        ));
    }
    if overlap >= chunk_size {
        return Err(PipelineError::Config(format!(
            "chunk_overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
        )));
    }

    // Byte offset of every char boundary, so slicing never splits a code point.
    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let total_chars = boundaries.len();
    let byte_at = |char_pos: usize| {
        if char_pos >= total_chars {
            text.len()
        } else {
            boundaries[char_pos]
        }
    };

    let mut chunks = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + chunk_size).min(total_chars);
        chunks.push(Chunk {
            content: text[byte_at(start)..byte_at(end)].to_string(),
            metadata: json!({ "chunk": chunks.len() }),
        });
        if end == total_chars {
            break;
        }
        start = end - overlap;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rebuilds the original text by dropping the leading `overlap` chars of
    /// every chunk after the first.
    fn reassemble(chunks: &[Chunk], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(&chunk.content);
            } else {
                out.extend(chunk.content.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn test_covers_text_with_exact_overlap() {
        let text: String = ('a'..='z').cycle().take(2500).collect();
        let chunks = split(&text, 1000, 20).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 1000);
        }
        for pair in chunks.windows(2) {
            let tail: String = pair[0]
                .content
                .chars()
                .skip(pair[0].content.chars().count() - 20)
                .collect();
            let head: String = pair[1].content.chars().take(20).collect();
            assert_eq!(tail, head);
        }
        assert_eq!(reassemble(&chunks, 20), text);
    }

    #[test]
    fn test_deterministic() {
        let text = "the quick brown fox jumps over the lazy dog".repeat(40);
        let a = split(&text, 100, 10).unwrap();
        let b = split(&text, 100, 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split("short resume", 1000, 20).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "short resume");
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = split("text", 0, 0).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        let err = split("text", 10, 10).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_multibyte_text_does_not_split_code_points() {
        let text = "héllo wörld ".repeat(30) + "日本語のテキスト";
        let chunks = split(&text, 50, 5).unwrap();
        assert_eq!(reassemble(&chunks, 5), text);
    }

    #[test]
    fn test_chunk_metadata_records_sequence() {
        let text = "x".repeat(25);
        let chunks = split(&text, 10, 2).unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata["chunk"], i);
        }
    }
}
