//! Docsage Resolve — the retrieval facade over chunker and vector store.

pub mod retriever;

pub use retriever::Retriever;
