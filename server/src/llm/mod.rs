//! LLM — upstream chat-completion client.
//!
//! DESIGN
//! ======
//! Single provider: an OpenAI-compatible `/chat/completions` endpoint
//! consumed in streaming mode. The client is configured from environment
//! variables once at startup and shared across requests via `AppState`.

pub mod config;
pub mod openai;
pub mod types;

pub use openai::OpenAiClient as LlmClient;
pub use types::LlmError;
