//! Shared chat message model and event-stream wire format.
//!
//! This crate owns the wire representation used by both `server` and
//! `client`: the transcript message model, the `data:` frame encoding for
//! streamed tokens, and an incremental decoder that reassembles frames
//! from arbitrary transport chunk boundaries.

use serde::{Deserialize, Serialize};

/// Terminal marker closing an event stream. Sent bare (not JSON-quoted).
pub const DONE_SENTINEL: &str = "[DONE]";

/// Error returned by [`EventStreamDecoder::push`] for a completed frame
/// whose bytes are not valid UTF-8. The decoder stays usable; callers log
/// and skip the frame.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame bytes could not be decoded as UTF-8 text.
    #[error("event frame is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

// =============================================================================
// MESSAGE MODEL
// =============================================================================

/// Author of a transcript message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry. Transcript ordering is chronological and is
/// preserved verbatim when replayed to the upstream completion API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request body accepted by the relay endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

// =============================================================================
// FRAME ENCODING
// =============================================================================

/// Encode one token fragment as an event frame: `data: "<token>"\n\n`.
///
/// The payload is the JSON encoding of the token so whitespace and
/// newlines inside the fragment survive the single-line `data:` field.
#[must_use]
pub fn token_frame(token: &str) -> String {
    // Serializing a &str cannot fail.
    let payload = serde_json::to_string(token).unwrap_or_default();
    format!("data: {payload}\n\n")
}

/// Encode the terminal frame: `data: [DONE]\n\n`.
#[must_use]
pub fn done_frame() -> String {
    format!("data: {DONE_SENTINEL}\n\n")
}

// =============================================================================
// FRAME DECODING
// =============================================================================

/// Incremental decoder for an event-stream body.
///
/// Bytes are pushed as they arrive from the transport; complete frames
/// (terminated by a blank line) are returned as their `data:` payloads.
/// Bytes of an incomplete frame stay buffered, so a frame — or a UTF-8
/// sequence inside one — may be split across chunks arbitrarily.
#[derive(Debug, Default)]
pub struct EventStreamDecoder {
    buffer: Vec<u8>,
}

impl EventStreamDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning the payload of every frame the chunk
    /// completes, in wire order. Lines without a `data: ` prefix are
    /// ignored.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<String, DecodeError>> {
        self.buffer.extend_from_slice(chunk);

        let mut out = Vec::new();
        while let Some(end) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            match std::str::from_utf8(&frame[..end]) {
                Ok(text) => {
                    for line in text.lines() {
                        if let Some(payload) = line.strip_prefix("data: ") {
                            out.push(Ok(payload.to_owned()));
                        }
                    }
                }
                Err(e) => out.push(Err(DecodeError::InvalidUtf8(e))),
            }
        }
        out
    }
}

/// Position of the first `\n\n` frame terminator, if the buffer holds one.
fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}

// =============================================================================
// PAYLOAD CLASSIFICATION
// =============================================================================

/// A decoded event payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// One streamed token fragment.
    Token(String),
    /// The terminal sentinel.
    Done,
    /// A payload that is neither the sentinel nor a JSON string. Not fatal
    /// to the stream; callers log and skip these.
    Malformed(String),
}

impl Event {
    /// Classify one frame payload.
    #[must_use]
    pub fn parse(payload: &str) -> Self {
        if payload == DONE_SENTINEL {
            return Self::Done;
        }
        match serde_json::from_str::<String>(payload) {
            Ok(token) => Self::Token(token),
            Err(_) => Self::Malformed(payload.to_owned()),
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
