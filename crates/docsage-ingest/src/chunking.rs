//! Sentence-aligned document chunking with heuristic overlap.
//!
//! Documents are split at sentence boundaries into chunks bounded by a
//! maximum code-point size. A new chunk is seeded with the preceding
//! sentence as overlap when that sentence is individually shorter than the
//! overlap budget; the window is a per-sentence-length heuristic, not a
//! fixed code-point count, so a long boundary sentence produces zero
//! overlap. That is a property of the design, not a defect.

use docsage_core::text::split_sentences;
use docsage_core::{Error, Result};
use docsage_store::{Document, DocumentChunk};

/// Splits documents into ordered, possibly overlapping chunks.
pub struct SentenceChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SentenceChunker {
    /// Create a chunker. Zero chunk size or overlap is a configuration
    /// error.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk size must be positive".to_string()));
        }
        if chunk_overlap == 0 {
            return Err(Error::Config("chunk overlap must be positive".to_string()));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split a document into chunks.
    ///
    /// Content no longer than the chunk size yields exactly one chunk
    /// covering the whole document (including zero-length content).
    pub fn chunk(&self, parent: &Document) -> Vec<DocumentChunk> {
        let total = parent.content.chars().count();
        if total <= self.chunk_size {
            return vec![derive_chunk(parent, parent.content.clone(), 0, 0, total)];
        }

        let sentences = split_sentences(&parent.content);
        let sentence_lens: Vec<usize> = sentences.iter().map(|s| s.chars().count()).collect();

        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_len = 0usize;
        let mut chunk_index = 0usize;
        let mut start = 0usize;

        for (i, sentence) in sentences.iter().enumerate() {
            if buffer_len + sentence_lens[i] > self.chunk_size && !buffer.is_empty() {
                // The buffer always carries one trailing join space; the
                // emitted chunk drops it. Sentence joining can insert
                // spaces absent from the parent (CJK text), so offsets are
                // clamped to the parent length.
                let content = buffer.trim_end().to_string();
                let end = (start + buffer_len - 1).min(total);
                chunks.push(derive_chunk(parent, content, chunk_index, start, end));
                chunk_index += 1;
                buffer.clear();
                buffer_len = 0;

                // Seed the new chunk with overlap: the sentence just
                // before the cut, included only when individually shorter
                // than the overlap budget. A long boundary sentence means
                // zero overlap.
                let mut overlap_from = i;
                if overlap_from > 0 && sentence_lens[i - 1] < self.chunk_overlap {
                    overlap_from = i - 1;
                }
                for j in overlap_from..i {
                    buffer.push_str(&sentences[j]);
                    buffer.push(' ');
                    buffer_len += sentence_lens[j] + 1;
                }
                let overlap_trimmed = buffer_len.saturating_sub(1);
                start = end.saturating_sub(overlap_trimmed);
            }

            buffer.push_str(sentence);
            buffer.push(' ');
            buffer_len += sentence_lens[i] + 1;
        }

        if !buffer.is_empty() {
            let content = buffer.trim_end().to_string();
            let end = (start + buffer_len - 1).min(total);
            chunks.push(derive_chunk(parent, content, chunk_index, start, end));
        }

        chunks
    }
}

/// Build a chunk document carrying the parent's filename and metadata.
fn derive_chunk(
    parent: &Document,
    content: String,
    chunk_index: usize,
    start: usize,
    end: usize,
) -> DocumentChunk {
    DocumentChunk {
        document: Document {
            id: format!("{}_chunk_{}", parent.id, chunk_index),
            content,
            filename: parent.filename.clone(),
            metadata: parent.metadata.clone(),
            embedding: None,
        },
        chunk_index,
        start,
        end,
    }
}
