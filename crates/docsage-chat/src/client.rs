//! Ollama HTTP client with streaming generation.
//!
//! `/api/generate` streams newline-delimited JSON; each line carries a
//! response fragment until `done` is reported.

use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use tokio_stream::StreamExt;
use tracing::debug;

use docsage_core::{Error, Result};

use crate::types::{GenerateOptions, GenerateRequest, GenerateResponse};

/// Boxed stream type for generation output.
pub type BoxedStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

/// A single streamed fragment, completion marker, or error.
pub enum StreamChunk {
    Token(String),
    Done { reason: Option<String> },
    Error(String),
}

/// Client for a local Ollama server.
pub struct OllamaClient {
    base_url: String,
    model: String,
    http: reqwest::Client,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a client for the given server and model. Requests time out
    /// after 60 seconds.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            http: reqwest::Client::new(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Check that the server is reachable via `GET /api/tags`.
    pub async fn check_health(&self) -> Result<()> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::Http(format!("cannot reach Ollama at {}: {}", self.base_url, e)))?;
        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "Ollama returned status {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Stream a completion for the prompt.
    pub fn stream_generate(&self, prompt: String, options: GenerateOptions) -> BoxedStream {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: true,
            options,
        };
        let client = self.http.clone();
        let timeout = self.timeout;

        Box::pin(async_stream::stream! {
            debug!("streaming from {} with model {}", url, request.model);

            let response = match client.post(&url).timeout(timeout).json(&request).send().await {
                Ok(r) => r,
                Err(e) => {
                    yield StreamChunk::Error(format!("request failed: {}", e));
                    return;
                }
            };

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                yield StreamChunk::Error(format!("API error {}: {}", status, body));
                return;
            }

            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = stream.next().await {
                let bytes = match chunk {
                    Ok(b) => b,
                    Err(e) => {
                        yield StreamChunk::Error(format!("stream read error: {}", e));
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                // Process complete NDJSON lines.
                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim().to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    if line.is_empty() {
                        continue;
                    }

                    match serde_json::from_str::<GenerateResponse>(&line) {
                        Ok(parsed) => {
                            if !parsed.response.is_empty() {
                                yield StreamChunk::Token(parsed.response);
                            }
                            if parsed.done {
                                yield StreamChunk::Done { reason: parsed.done_reason };
                                return;
                            }
                        }
                        Err(e) => {
                            yield StreamChunk::Error(format!("malformed stream line: {}", e));
                            return;
                        }
                    }
                }
            }

            yield StreamChunk::Done { reason: None };
        })
    }
}
