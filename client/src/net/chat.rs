//! Streaming exchange with the relay endpoint.
//!
//! Client-side (csr): a real fetch via `gloo-net`, reading the response
//! body incrementally through the browser `ReadableStream` reader. Native
//! builds get an inert stub so the state layer stays testable off the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! A malformed event payload is logged and skipped; the stream continues.
//! A transport failure (non-success status, missing body, read error)
//! aborts the whole exchange and rolls the transcript back via
//! [`ChatState::abort`], leaving only the user's own messages.

#![allow(clippy::unused_async)]

use leptos::prelude::*;

use events::ChatMessage;

use crate::state::chat::ChatState;

/// Run one full exchange: POST the transcript, then consume the event
/// stream into the assistant placeholder until the sentinel arrives.
pub async fn stream_exchange(chat: RwSignal<ChatState>, transcript: Vec<ChatMessage>) {
    #[cfg(feature = "csr")]
    {
        if let Err(error) = run_exchange(chat, transcript).await {
            log::error!("chat exchange failed: {error}");
            chat.update(ChatState::abort);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (chat, transcript);
    }
}

#[cfg(feature = "csr")]
async fn run_exchange(
    chat: RwSignal<ChatState>,
    transcript: Vec<ChatMessage>,
) -> Result<(), String> {
    use events::{ChatRequest, Event, EventStreamDecoder};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let response = gloo_net::http::Request::post("/api/chat")
        .json(&ChatRequest { messages: transcript })
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("relay returned status {}", response.status()));
    }
    let body = response
        .body()
        .ok_or_else(|| "response has no body".to_owned())?;
    let reader: web_sys::ReadableStreamDefaultReader = body
        .get_reader()
        .dyn_into()
        .map_err(|_| "response body reader unavailable".to_owned())?;

    // Only create the placeholder once the stream is known good.
    chat.update(ChatState::begin_assistant);

    let mut decoder = EventStreamDecoder::new();
    loop {
        let result = JsFuture::from(reader.read())
            .await
            .map_err(|_| "read from response stream failed".to_owned())?;
        let done = js_sys::Reflect::get(&result, &"done".into())
            .ok()
            .and_then(|done| done.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }
        let chunk = js_sys::Reflect::get(&result, &"value".into())
            .ok()
            .and_then(|value| value.dyn_into::<js_sys::Uint8Array>().ok())
            .ok_or_else(|| "response stream yielded a non-byte chunk".to_owned())?
            .to_vec();

        for payload in decoder.push(&chunk) {
            let payload = match payload {
                Ok(payload) => payload,
                Err(error) => {
                    log::error!("undecodable event frame: {error}");
                    continue;
                }
            };
            match Event::parse(&payload) {
                Event::Token(token) => chat.update(|state| state.append_fragment(&token)),
                Event::Done => {
                    chat.update(ChatState::finish);
                    return Ok(());
                }
                Event::Malformed(raw) => log::error!("malformed event payload: {raw}"),
            }
        }
    }

    // Stream ended without a sentinel; treat as complete rather than
    // leaving the typing indicator stuck.
    chat.update(ChatState::finish);
    Ok(())
}
