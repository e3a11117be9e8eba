//! Docsage Store — documents, search results, and the vector store.

pub mod types;
pub mod vector;

pub use types::{Document, DocumentChunk, SearchResult};
pub use vector::VectorStore;
