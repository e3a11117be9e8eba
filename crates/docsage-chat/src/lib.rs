//! Docsage Chat — answer generation over retrieved chunks.
//!
//! The primary path streams a completion from a local Ollama server; the
//! fallback is rule-based keyword extraction that needs no model at all.

pub mod client;
pub mod fallback;
pub mod generate;
pub mod prompt;
pub mod types;

pub use client::{OllamaClient, StreamChunk};
pub use generate::Generator;
pub use types::{GenerateOptions, GenerateRequest, GenerateResponse};
