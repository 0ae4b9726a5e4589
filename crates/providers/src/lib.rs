//! Provider implementations for deckproof.
//!
//! - [`OpenAiCompatProvider`] — any OpenAI-compatible `/v1/chat/completions`
//!   endpoint, with tool calling and JSON-object response mode.
//! - [`RetryProvider`] — wraps a provider with per-attempt timeouts and
//!   bounded exponential backoff for transient failures.

pub mod openai_compat;
pub mod retry;

pub use openai_compat::OpenAiCompatProvider;
pub use retry::RetryProvider;
