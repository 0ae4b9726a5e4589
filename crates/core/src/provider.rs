//! Provider trait — the abstraction over the model-completion collaborator.
//!
//! A Provider knows how to send a transcript (plus the tool schema) to a
//! model and get one response back: either free text or a batch of tool
//! calls. The review loop calls `complete()` without knowing which backend
//! is configured.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Message;

/// Configuration for a single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g. "gpt-4o")
    pub model: String,

    /// The transcript so far
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,

    /// Tool-choice mode ("auto" for the review loop; None when no tools)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,

    /// Request a JSON-object response body (used by the text-analysis call)
    #[serde(default)]
    pub json_response: bool,
}

fn default_temperature() -> f32 {
    0.7
}

impl ProviderRequest {
    /// A plain request with no tools attached.
    pub fn text(model: impl Into<String>, messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            max_tokens: None,
            tools: Vec::new(),
            tool_choice: None,
            json_response: false,
        }
    }
}

/// A tool definition sent to the model so it knows what it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated message (content and/or tool calls)
    pub message: Message,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// Implementations: the OpenAI-compatible HTTP backend, the retry wrapper,
/// and the mock providers used in loop tests.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g. "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_request_has_no_tools() {
        let req = ProviderRequest::text("gpt-4o", vec![Message::user("hi")], 0.1);
        assert!(req.tools.is_empty());
        assert!(req.tool_choice.is_none());
        assert!(!req.json_response);
        assert!((req.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn tool_definition_serialization() {
        let tool = ToolDefinition {
            name: "add_correction".into(),
            description: "Add a correction to the pending list".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "slide_number": { "type": "integer" }
                },
                "required": ["slide_number"]
            }),
        };
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("add_correction"));
        assert!(json.contains("slide_number"));
    }
}
