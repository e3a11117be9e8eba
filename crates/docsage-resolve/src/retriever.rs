//! Retrieval facade: builds the corpus from a document directory and
//! answers queries against the vector store.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use docsage_core::Result;
use docsage_ingest::{load_documents_from_dir, SentenceChunker};
use docsage_store::{SearchResult, VectorStore};

/// Thin orchestration over chunker and vector store.
pub struct Retriever {
    store: Arc<VectorStore>,
    chunker: SentenceChunker,
}

impl Retriever {
    /// Create a retriever. Chunking parameters are validated here, before
    /// any document is touched.
    pub fn new(store: Arc<VectorStore>, chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let chunker = SentenceChunker::new(chunk_size, chunk_overlap)?;
        Ok(Self { store, chunker })
    }

    /// Build the store from a directory of `.txt` files and persist it.
    ///
    /// Build-once: when `store_path` already exists this is a no-op;
    /// callers that want a rebuild remove the file first. Chunks that fail
    /// to embed are skipped with a warning rather than aborting the build.
    pub fn build_from_directory(&self, docs_dir: &Path, store_path: &Path) -> Result<()> {
        if store_path.exists() {
            info!("store {} already exists, skipping build", store_path.display());
            return Ok(());
        }

        let documents = load_documents_from_dir(docs_dir)?;
        info!("found {} documents in {}", documents.len(), docs_dir.display());

        let mut total_chunks = 0usize;
        for doc in &documents {
            for chunk in self.chunker.chunk(doc) {
                let chunk_doc = chunk.into_document();
                match self.store.add_document(chunk_doc) {
                    Ok(()) => total_chunks += 1,
                    Err(e) => warn!("failed to add chunk: {}", e),
                }
            }
        }
        info!("indexed {} chunks", total_chunks);

        self.store.save(store_path)
    }

    /// Rank stored chunks against a query.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        self.store.search(query, top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsage_infer::HashingEmbedder;

    fn retriever_with_store() -> (Retriever, Arc<VectorStore>) {
        let store = Arc::new(VectorStore::new(Arc::new(
            HashingEmbedder::new(300).unwrap(),
        )));
        let retriever = Retriever::new(store.clone(), 500, 50).unwrap();
        (retriever, store)
    }

    #[test]
    fn test_invalid_chunk_config_rejected() {
        let store = Arc::new(VectorStore::new(Arc::new(
            HashingEmbedder::new(300).unwrap(),
        )));
        assert!(Retriever::new(store, 0, 50).is_err());
    }

    #[test]
    fn test_build_and_retrieve_refund_policy() {
        let docs = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        std::fs::write(
            docs.path().join("policy.txt"),
            "退款需要在7天内申请。退款审核需要3个工作日。",
        )
        .unwrap();
        let store_path = data.path().join("vector_store.json");

        let (retriever, store) = retriever_with_store();
        retriever
            .build_from_directory(docs.path(), &store_path)
            .unwrap();

        // One short document, one chunk.
        assert_eq!(store.document_count(), 1);
        assert!(store_path.exists());

        let results = retriever.retrieve("退款流程", 3).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].score > 0.0);
        assert!(results[0].document.content.contains("退款"));
        assert_eq!(results[0].document.filename, "policy.txt");
    }

    #[test]
    fn test_build_is_noop_when_store_exists() {
        let docs = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("doc.txt"), "some content here.").unwrap();
        let store_path = data.path().join("vector_store.json");
        std::fs::write(&store_path, "sentinel").unwrap();

        let (retriever, store) = retriever_with_store();
        retriever
            .build_from_directory(docs.path(), &store_path)
            .unwrap();

        // Nothing indexed, file untouched.
        assert_eq!(store.document_count(), 0);
        assert_eq!(std::fs::read_to_string(&store_path).unwrap(), "sentinel");
    }

    #[test]
    fn test_rebuild_after_removing_store_file() {
        let docs = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("doc.txt"), "rebuildable content.").unwrap();
        let store_path = data.path().join("vector_store.json");

        let (retriever, store) = retriever_with_store();
        retriever.build_from_directory(docs.path(), &store_path).unwrap();
        assert_eq!(store.document_count(), 1);

        std::fs::remove_file(&store_path).unwrap();
        retriever.build_from_directory(docs.path(), &store_path).unwrap();
        assert!(store_path.exists());
    }

    #[test]
    fn test_long_document_yields_multiple_chunks() {
        let docs = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let sentence = "退款政策说明第一条，所有商品支持七天无理由退货服务。";
        std::fs::write(docs.path().join("long.txt"), sentence.repeat(20)).unwrap();
        let store_path = data.path().join("vector_store.json");

        let store = Arc::new(VectorStore::new(Arc::new(
            HashingEmbedder::new(300).unwrap(),
        )));
        let retriever = Retriever::new(store.clone(), 100, 30).unwrap();
        retriever.build_from_directory(docs.path(), &store_path).unwrap();

        assert!(store.document_count() > 1);
    }
}
