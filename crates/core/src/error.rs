//! Error types for the deckproof domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all deckproof operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Document errors ---
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures at the document-collaborator boundary.
///
/// `Extraction` aborts a run before the loop starts; `Persistence` aborts it
/// mid-run. Everything else is surfaced where it occurs.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read package: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid archive: {0}")]
    Zip(String),

    #[error("Malformed part '{part}': {reason}")]
    Xml { part: String, reason: String },

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Slide {0} not found")]
    SlideNotFound(usize),

    #[error("Failed to save '{path}': {reason}")]
    Persistence { path: String, reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// Whether a bounded retry can reasonably expect a different outcome.
    ///
    /// Auth failures and malformed responses are deterministic; network
    /// hiccups, timeouts, rate limits, and 5xx responses are not.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Network(_)
            | ProviderError::Timeout(_)
            | ProviderError::RateLimited { .. } => true,
            ProviderError::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn transient_classification() {
        assert!(ProviderError::Network("reset".into()).is_transient());
        assert!(ProviderError::RateLimited { retry_after_secs: 5 }.is_transient());
        assert!(
            ProviderError::ApiError {
                status_code: 503,
                message: "overloaded".into()
            }
            .is_transient()
        );
        assert!(
            !ProviderError::AuthenticationFailed("bad key".into()).is_transient()
        );
        assert!(
            !ProviderError::ApiError {
                status_code: 400,
                message: "bad request".into()
            }
            .is_transient()
        );
    }

    #[test]
    fn document_error_displays_correctly() {
        let err = Error::Document(DocumentError::Persistence {
            path: "out.pptx".into(),
            reason: "disk full".into(),
        });
        assert!(err.to_string().contains("out.pptx"));
        assert!(err.to_string().contains("disk full"));
    }
}
