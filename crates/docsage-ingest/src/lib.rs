//! Docsage Ingest — text chunking and document loading.

pub mod chunking;
pub mod file;

pub use chunking::SentenceChunker;
pub use file::load_documents_from_dir;
