//! Relay endpoint: transcript in, token event stream out.
//!
//! DESIGN
//! ======
//! The request body is read in full, validated, and forwarded verbatim to
//! the upstream completion API in streaming mode. Each upstream delta is
//! re-emitted as one event frame, and the stream always terminates with
//! the `[DONE]` sentinel frame — including after a mid-stream upstream
//! failure — so the client's read loop never hangs.
//!
//! Per request the exchange is strictly linear:
//! IDLE -> HEADERS_SENT -> STREAMING -> DONE, with no transition back.
//! An upstream failure before the first byte maps to a 500 JSON error; a
//! later failure is terminal for the request and only shortens the token
//! stream.

use std::convert::Infallible;
use std::future;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use futures::stream::{self, Stream, StreamExt};
use serde_json::{Value, json};

use events::{ChatMessage, done_frame, token_frame};

use crate::llm::LlmError;
use crate::state::AppState;

/// `POST /api/chat` — relay a transcript to the upstream completion API
/// and stream the response back as server-sent events.
pub async fn relay_chat(State(state): State<AppState>, body: Bytes) -> Response {
    let messages = match parse_transcript(&body) {
        Ok(messages) => messages,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, &error),
    };

    let upstream = match state.llm.stream_chat(&messages).await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::error!(error = %e, "upstream request failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your request.",
            );
        }
    };

    let frames = relay_frames(upstream).map(Ok::<_, Infallible>);
    (
        [
            (header::CONTENT_TYPE, "text/event-stream; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache, no-transform"),
        ],
        Body::from_stream(frames),
    )
        .into_response()
}

/// Fallback for `/api/chat` hit with any method other than POST.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

/// Validate the raw request body: it must be a JSON object whose
/// `messages` field is an array of role/content pairs.
fn parse_transcript(body: &[u8]) -> Result<Vec<ChatMessage>, String> {
    let root: Value =
        serde_json::from_slice(body).map_err(|_| "Invalid JSON in request body".to_owned())?;
    let Some(messages) = root.get("messages").filter(|m| m.is_array()) else {
        return Err("Invalid request body".to_owned());
    };
    serde_json::from_value(messages.clone()).map_err(|_| "Invalid request body".to_owned())
}

/// Wrap each upstream token as an event frame and append the terminal
/// sentinel. A mid-stream upstream error ends the token stream early; the
/// sentinel is still emitted so the client terminates cleanly.
fn relay_frames(
    upstream: impl Stream<Item = Result<String, LlmError>>,
) -> impl Stream<Item = Bytes> {
    upstream
        .map(|item| match item {
            Ok(token) => Some(Bytes::from(token_frame(&token))),
            Err(e) => {
                tracing::error!(error = %e, "upstream stream failed mid-response");
                None
            }
        })
        .take_while(|frame| future::ready(frame.is_some()))
        .filter_map(future::ready)
        .chain(stream::once(future::ready(Bytes::from(done_frame()))))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
