//! Shared application state.

use std::sync::Arc;

use crate::llm::LlmClient;

/// Shared application state, injected into Axum handlers via State extractor.
/// The LLM client is built once at startup and reused by every request; its
/// configuration never changes, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<LlmClient>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: LlmClient) -> Self {
        Self { llm: Arc::new(llm) }
    }
}
