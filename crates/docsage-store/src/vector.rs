//! Append-only vector store with exhaustive cosine search and JSON
//! persistence.
//!
//! The corpus is a pair of parallel arrays — documents and their vectors,
//! joined by index position — behind a single reader/writer lock. Searches
//! share the read lock; insertion and load are exclusive.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use docsage_core::text::cosine_similarity;
use docsage_core::{Error, Result};
use docsage_infer::{Embedder, QueryCache};

use crate::types::{Document, SearchResult};

#[derive(Default)]
struct Corpus {
    documents: Vec<Document>,
    vectors: Vec<Vec<f32>>,
}

/// Persisted store file: two index-aligned arrays.
#[derive(Serialize, Deserialize)]
struct PersistedCorpus {
    documents: Vec<Document>,
    vectors: Vec<Vec<f32>>,
}

/// In-memory vector store over a pluggable embedder.
pub struct VectorStore {
    corpus: RwLock<Corpus>,
    embedder: Arc<dyn Embedder>,
    query_cache: QueryCache,
}

impl VectorStore {
    /// Create an empty store over the given embedder.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            corpus: RwLock::new(Corpus::default()),
            embedder,
            query_cache: QueryCache::default_cache(),
        }
    }

    /// Embed and append a document. The write lock covers the embedding so
    /// corpus order always matches insertion order.
    pub fn add_document(&self, doc: Document) -> Result<()> {
        let mut corpus = self.corpus.write();
        let vector = self
            .embedder
            .embed(&doc.content)
            .map_err(|e| Error::Embedding(format!("document {}: {}", doc.id, e)))?;
        corpus.documents.push(doc);
        corpus.vectors.push(vector);
        Ok(())
    }

    /// Append documents sequentially. Stops at the first failure; prior
    /// insertions stay in place.
    pub fn add_documents(&self, docs: Vec<Document>) -> Result<()> {
        for doc in docs {
            self.add_document(doc)?;
        }
        Ok(())
    }

    /// Rank the corpus against a query by cosine similarity.
    ///
    /// Exhaustive scan; descending score with ties kept in insertion order.
    /// An empty corpus or `top_k == 0` yields an empty result, not an error.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        let corpus = self.corpus.read();
        if corpus.documents.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.embed_query(query)?;
        let mut results: Vec<SearchResult> = corpus
            .documents
            .iter()
            .zip(corpus.vectors.iter())
            .map(|(doc, vector)| SearchResult {
                document: doc.clone(),
                score: cosine_similarity(&query_vector, vector),
            })
            .collect();
        // Stable sort: equal scores preserve insertion order.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);
        Ok(results)
    }

    fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        if let Some(cached) = self.query_cache.get(query) {
            debug!("query embedding served from cache");
            return Ok(cached);
        }
        let vector = self
            .embedder
            .embed(query)
            .map_err(|e| Error::Embedding(format!("query: {}", e)))?;
        self.query_cache.put(query.to_string(), vector.clone());
        Ok(vector)
    }

    /// Serialize the corpus to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let corpus = self.corpus.read();
        let persisted = PersistedCorpus {
            documents: corpus.documents.clone(),
            vectors: corpus.vectors.clone(),
        };
        let json = serde_json::to_string_pretty(&persisted)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        info!("saved {} documents to {}", persisted.documents.len(), path.display());
        Ok(())
    }

    /// Replace the corpus from a persisted JSON file.
    ///
    /// The file is fully parsed and validated before the swap, so a
    /// partial or corrupt file never leaves the store half-overwritten.
    pub fn load(&self, path: &Path) -> Result<()> {
        let json = std::fs::read_to_string(path)?;
        let persisted: PersistedCorpus = serde_json::from_str(&json)?;
        if persisted.documents.len() != persisted.vectors.len() {
            return Err(Error::Consistency(format!(
                "persisted store has {} documents but {} vectors",
                persisted.documents.len(),
                persisted.vectors.len()
            )));
        }

        let mut corpus = self.corpus.write();
        corpus.documents = persisted.documents;
        corpus.vectors = persisted.vectors;
        info!("loaded {} documents from {}", corpus.documents.len(), path.display());
        Ok(())
    }

    /// Current corpus size.
    pub fn document_count(&self) -> usize {
        self.corpus.read().documents.len()
    }

    /// The embedder's dimension.
    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsage_infer::HashingEmbedder;

    fn test_store(dim: usize) -> VectorStore {
        VectorStore::new(Arc::new(HashingEmbedder::new(dim).unwrap()))
    }

    fn doc(id: &str, content: &str) -> Document {
        Document::new(id, content, "test.txt")
    }

    /// Embedder that fails on a marker substring, for batch-failure tests.
    struct FlakyEmbedder {
        inner: HashingEmbedder,
    }

    impl Embedder for FlakyEmbedder {
        fn embed(&self, text: &str) -> docsage_core::Result<Vec<f32>> {
            if text.contains("poison") {
                return Err(Error::Embedding("poisoned input".to_string()));
            }
            self.inner.embed(text)
        }

        fn dimension(&self) -> usize {
            self.inner.dimension()
        }
    }

    #[test]
    fn test_add_and_count() {
        let store = test_store(64);
        assert_eq!(store.document_count(), 0);
        store.add_document(doc("a", "first document")).unwrap();
        store.add_document(doc("b", "second document")).unwrap();
        assert_eq!(store.document_count(), 2);
    }

    #[test]
    fn test_search_empty_store_is_empty() {
        let store = test_store(64);
        let results = store.search("anything", 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_zero_top_k_is_empty() {
        let store = test_store(64);
        store.add_document(doc("a", "content")).unwrap();
        assert!(store.search("content", 0).unwrap().is_empty());
    }

    #[test]
    fn test_search_ranks_relevant_first() {
        let store = test_store(300);
        store
            .add_document(doc("refund", "退款需要在7天内申请。退款审核需要3个工作日。"))
            .unwrap();
        store
            .add_document(doc("shipping", "商品将在48小时内发货，支持全国配送。"))
            .unwrap();

        let results = store.search("退款流程", 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.id, "refund");
        assert!(results[0].score > results[1].score);
        assert!(results[0].score > 0.0);
    }

    #[test]
    fn test_search_clamps_top_k_and_sorts_descending() {
        let store = test_store(300);
        for i in 0..3 {
            store.add_document(doc(&format!("d{}", i), "some shared text")).unwrap();
        }
        let results = store.search("shared", 10).unwrap();
        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_tied_scores_keep_insertion_order() {
        let store = test_store(300);
        // Identical content embeds identically, so all scores tie.
        store.add_document(doc("first", "identical text")).unwrap();
        store.add_document(doc("second", "identical text")).unwrap();
        store.add_document(doc("third", "identical text")).unwrap();

        let results = store.search("identical", 3).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_add_documents_stops_at_first_failure() {
        let store = VectorStore::new(Arc::new(FlakyEmbedder {
            inner: HashingEmbedder::new(64).unwrap(),
        }));
        let docs = vec![
            doc("one", "fine"),
            doc("two", "poison here"),
            doc("three", "also fine"),
        ];
        let err = store.add_documents(docs).unwrap_err();
        assert!(err.to_string().contains("two"));
        assert_eq!(store.document_count(), 1);
    }

    #[test]
    fn test_save_load_roundtrip_is_bitwise() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = test_store(300);
        let mut original = doc("a", "退款需要在7天内申请。");
        original.metadata.insert("type".into(), "text".into());
        store.add_document(original.clone()).unwrap();
        store.add_document(doc("b", "second entry")).unwrap();
        store.save(&path).unwrap();

        let restored = test_store(300);
        restored.load(&path).unwrap();
        assert_eq!(restored.document_count(), 2);

        // Vectors must round-trip bitwise: identical ranking afterwards.
        let before = store.search("退款", 2).unwrap();
        let after = restored.search("退款", 2).unwrap();
        assert_eq!(before.len(), after.len());
        for (x, y) in before.iter().zip(after.iter()) {
            assert_eq!(x.document, y.document);
            assert_eq!(x.score.to_bits(), y.score.to_bits());
        }
    }

    #[test]
    fn test_load_rejects_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(
            &path,
            r#"{"documents":[{"id":"a","content":"x","filename":"f","metadata":{}}],"vectors":[]}"#,
        )
        .unwrap();

        let store = test_store(64);
        let err = store.load(&path).unwrap_err();
        assert!(matches!(err, Error::Consistency(_)));
    }

    #[test]
    fn test_load_failure_keeps_existing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = test_store(64);
        store.add_document(doc("keep", "existing content")).unwrap();
        assert!(store.load(&path).is_err());
        assert_eq!(store.document_count(), 1);
    }

    #[test]
    fn test_repeated_query_hits_cache() {
        let store = test_store(64);
        store.add_document(doc("a", "cached query target")).unwrap();
        let first = store.search("cached query", 1).unwrap();
        let second = store.search("cached query", 1).unwrap();
        assert_eq!(first[0].score.to_bits(), second[0].score.to_bits());
    }
}
