//! Data types for documents, chunks, and search results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A unit of retrievable text. Immutable once created; chunking derives
/// new documents from a parent rather than mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub filename: String,
    /// Ordered string metadata (filename, path, type, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Unused at the top level — corpus vectors live in the parallel array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    /// Create a document with empty metadata and no embedding.
    pub fn new(id: impl Into<String>, content: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            filename: filename.into(),
            metadata: BTreeMap::new(),
            embedding: None,
        }
    }
}

/// A document chunk: a derived Document plus its position within the
/// parent. Offsets are in code points; `start < end` except for the
/// zero-length single chunk of an empty parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub document: Document,
    pub chunk_index: usize,
    pub start: usize,
    pub end: usize,
}

impl DocumentChunk {
    /// Discard chunk bookkeeping, keeping the derived document for storage.
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// A retrieved document with its cosine similarity to the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: Document,
    pub score: f64,
}
