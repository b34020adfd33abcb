//! OpenAI-compatible streaming chat client.
//!
//! DESIGN
//! ======
//! One request shape: `POST {base}/chat/completions` with `stream: true`.
//! The response body is an event stream; each frame payload carries a
//! delta with an optional content fragment. Frames are reassembled with
//! the shared [`EventStreamDecoder`], so transport chunk boundaries never
//! split a frame.

use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use serde::Serialize;
use serde_json::Value;

use events::{ChatMessage, DONE_SENTINEL, EventStreamDecoder};

use super::config::LlmConfig;
use super::types::LlmError;

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Streaming chat-completions request body.
#[derive(Serialize)]
struct StreamRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

impl OpenAiClient {
    /// Build the client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
            model: config.model,
        })
    }

    /// Model name sent upstream (e.g. `"gpt-4o"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Open a streaming chat completion for `messages`, forwarded verbatim
    /// and in order.
    ///
    /// Yields token fragments in arrival order. The upstream terminal
    /// sentinel and empty deltas are filtered out; malformed frame
    /// payloads are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the provider
    /// responds with a non-success status. Failures after the stream has
    /// started are yielded as stream items instead.
    pub async fn stream_chat(
        &self,
        messages: &[ChatMessage],
    ) -> Result<BoxStream<'static, Result<String, LlmError>>, LlmError> {
        let body = StreamRequest { model: &self.model, messages, stream: true };
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiResponse { status, body });
        }

        let mut decoder = EventStreamDecoder::new();
        let tokens = response.bytes_stream().flat_map(move |chunk| {
            let items: Vec<Result<String, LlmError>> = match chunk {
                Ok(bytes) => decoder
                    .push(&bytes)
                    .into_iter()
                    .filter_map(|payload| match payload {
                        Ok(payload) => delta_content(&payload).map(Ok),
                        Err(e) => {
                            tracing::warn!(error = %e, "skipping undecodable upstream frame");
                            None
                        }
                    })
                    .collect(),
                Err(e) => vec![Err(LlmError::ApiRequest(e.to_string()))],
            };
            stream::iter(items)
        });
        Ok(tokens.boxed())
    }
}

/// Extract the content fragment from one upstream frame payload
/// (`choices[0].delta.content`).
///
/// Returns `None` for the upstream sentinel, payloads without a content
/// string, and empty fragments. Malformed JSON is logged and skipped; an
/// individual bad frame is never fatal to the stream.
fn delta_content(payload: &str) -> Option<String> {
    if payload == DONE_SENTINEL {
        return None;
    }
    let root: Value = match serde_json::from_str(payload) {
        Ok(root) => root,
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed upstream frame payload");
            return None;
        }
    };
    let content = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("delta"))
        .and_then(|delta| delta.get("content"))
        .and_then(Value::as_str)?;
    if content.is_empty() {
        None
    } else {
        Some(content.to_owned())
    }
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
