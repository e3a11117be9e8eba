//! Docsage Infer — embedding generation and the query embedding cache.
//!
//! Provides the `Embedder` trait for turning text into fixed-length
//! vectors. The production implementation is `HashingEmbedder`, a
//! deterministic hashed character n-gram feature map; the trait leaves
//! room for substitutable backends without touching the store.

pub mod cache;
pub mod embedder;

pub use cache::QueryCache;
pub use embedder::{Embedder, HashingEmbedder};
