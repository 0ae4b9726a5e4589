//! Model-backed text analysis.
//!
//! One-shot completion with a fixed proofreader instruction, low
//! temperature, and a JSON-object response body. The verdict is parsed into
//! a typed structure; anything that does not parse is a malformed-response
//! error, distinct from transport failures.

use serde::{Deserialize, Serialize};

use deckproof_core::error::ProviderError;
use deckproof_core::message::Message;
use deckproof_core::provider::{Provider, ProviderRequest};

/// Sampling temperature for the analysis call. Kept low so repeated
/// analyses of the same text agree.
const ANALYSIS_TEMPERATURE: f32 = 0.1;

const PROOFREADER_INSTRUCTION: &str = r#"You are a professional proofreader. Analyze the given text for:
1. Spelling errors
2. Grammar errors
3. Punctuation issues
4. Awkward phrasing

Return JSON with this structure:
{
    "has_errors": true/false,
    "corrected_text": "the corrected text",
    "errors_found": [
        {"type": "spelling|grammar|punctuation", "original": "wrong", "correction": "right", "explanation": "why"}
    ]
}

Be conservative - only flag clear errors. Preserve technical terms and intentional stylistic choices.
Do NOT change meaning or rewrite for style."#;

/// One detected error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub correction: String,
    #[serde(default)]
    pub explanation: String,
}

/// The structured verdict for one piece of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisVerdict {
    pub has_errors: bool,
    #[serde(default)]
    pub corrected_text: String,
    #[serde(default)]
    pub errors_found: Vec<AnalysisEntry>,
}

/// Ask the model whether `text` from `slide_number` contains errors.
pub async fn analyze_text(
    provider: &dyn Provider,
    model: &str,
    slide_number: usize,
    text: &str,
) -> Result<AnalysisVerdict, ProviderError> {
    let mut request = ProviderRequest::text(
        model,
        vec![
            Message::system(PROOFREADER_INSTRUCTION),
            Message::user(format!(
                "Analyze this text from slide {slide_number}:\n\n\"{text}\""
            )),
        ],
        ANALYSIS_TEMPERATURE,
    );
    request.json_response = true;

    let response = provider.complete(request).await?;

    serde_json::from_str(&response.message.content).map_err(|e| {
        ProviderError::MalformedResponse(format!("analysis verdict did not parse: {e}"))
    })
}
