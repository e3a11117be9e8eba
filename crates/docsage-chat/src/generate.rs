//! Answer generation over retrieved chunks.

use tokio_stream::StreamExt;
use tracing::debug;

use docsage_core::{Error, Result};
use docsage_store::{Document, SearchResult};

use crate::client::{OllamaClient, StreamChunk};
use crate::fallback::NO_RESULTS_REPLY;
use crate::prompt::{build_rag_prompt, build_refund_prompt};
use crate::types::GenerateOptions;

/// Keywords selecting the refund-specific prompt template.
const REFUND_KEYWORDS: [&str; 2] = ["退款", "退货"];

/// Generates answers from search results via an Ollama model.
pub struct Generator {
    client: OllamaClient,
    options: GenerateOptions,
}

impl Generator {
    pub fn new(client: OllamaClient, options: GenerateOptions) -> Self {
        Self { client, options }
    }

    /// Generate an answer for the query from the retrieved chunks.
    ///
    /// Streams the completion, forwarding each fragment to `on_token` when
    /// given, and returns the trimmed full text. Empty results short-circuit
    /// to a canned reply without touching the model.
    pub async fn generate_answer(
        &self,
        query: &str,
        results: &[SearchResult],
        mut on_token: Option<&mut (dyn FnMut(&str) + Send)>,
    ) -> Result<String> {
        if results.is_empty() {
            return Ok(NO_RESULTS_REPLY.to_string());
        }

        let documents: Vec<Document> = results.iter().map(|r| r.document.clone()).collect();
        let prompt = if REFUND_KEYWORDS.iter().any(|k| query.contains(k)) {
            build_refund_prompt(query, &documents)
        } else {
            build_rag_prompt(query, &documents)
        };

        let mut stream = self.client.stream_generate(prompt, self.options.clone());
        let mut answer = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                StreamChunk::Token(token) => {
                    if let Some(cb) = on_token.as_mut() {
                        cb(&token);
                    }
                    answer.push_str(&token);
                }
                StreamChunk::Done { reason } => {
                    debug!("generation finished: {:?}", reason);
                    break;
                }
                StreamChunk::Error(e) => return Err(Error::Http(e)),
            }
        }
        Ok(answer.trim().to_string())
    }
}
