//! The tool enumeration and its schemas.

use serde::Deserialize;

use deckproof_core::correction::CorrectionCategory;
use deckproof_core::provider::ToolDefinition;

/// Every tool the review loop can invoke. Closed set — adding a tool means
/// adding a variant, and the dispatcher's match stops compiling until it is
/// handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ExtractSlideContent,
    AnalyzeTextForErrors,
    AnalyzeAlignment,
    AddCorrection,
    ApplyAllCorrections,
    MarkComplete,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::ExtractSlideContent,
        ToolKind::AnalyzeTextForErrors,
        ToolKind::AnalyzeAlignment,
        ToolKind::AddCorrection,
        ToolKind::ApplyAllCorrections,
        ToolKind::MarkComplete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::ExtractSlideContent => "extract_slide_content",
            ToolKind::AnalyzeTextForErrors => "analyze_text_for_errors",
            ToolKind::AnalyzeAlignment => "analyze_alignment",
            ToolKind::AddCorrection => "add_correction",
            ToolKind::ApplyAllCorrections => "apply_all_corrections",
            ToolKind::MarkComplete => "mark_complete",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::ExtractSlideContent => {
                "Extract all text content from the presentation for analysis"
            }
            ToolKind::AnalyzeTextForErrors => {
                "Use the model to analyze specific text for spelling and grammar errors"
            }
            ToolKind::AnalyzeAlignment => {
                "Analyze alignment consistency of titles across slides"
            }
            ToolKind::AddCorrection => "Add a correction to the pending list",
            ToolKind::ApplyAllCorrections => {
                "Apply all pending corrections to the presentation and save"
            }
            ToolKind::MarkComplete => "Mark the review task as complete",
        }
    }

    pub fn parameters(self) -> serde_json::Value {
        match self {
            ToolKind::ExtractSlideContent
            | ToolKind::AnalyzeAlignment
            | ToolKind::ApplyAllCorrections
            | ToolKind::MarkComplete => serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
            ToolKind::AnalyzeTextForErrors => serde_json::json!({
                "type": "object",
                "properties": {
                    "slide_number": { "type": "integer", "description": "The slide number" },
                    "text": { "type": "string", "description": "The text to analyze" }
                },
                "required": ["slide_number", "text"]
            }),
            ToolKind::AddCorrection => serde_json::json!({
                "type": "object",
                "properties": {
                    "slide_number": { "type": "integer", "description": "The slide number" },
                    "shape_name": { "type": "string", "description": "The name of the shape to correct" },
                    "shape_index": { "type": "integer", "description": "The shape's index from extraction; disambiguates shapes sharing a name" },
                    "original_text": { "type": "string", "description": "The original text or value" },
                    "corrected_text": { "type": "string", "description": "The corrected text, or the target left position in EMUs for alignment" },
                    "correction_type": { "type": "string", "enum": ["spelling", "grammar", "alignment", "formatting"] },
                    "reasoning": { "type": "string", "description": "Why this correction is needed" }
                },
                "required": ["slide_number", "shape_name", "original_text", "corrected_text", "correction_type", "reasoning"]
            }),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }

    /// The full tool schema sent to the model each iteration.
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.into_iter().map(ToolKind::definition).collect()
    }
}

/// Arguments for `analyze_text_for_errors`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzeTextArgs {
    pub slide_number: usize,
    pub text: String,
}

/// Arguments for `add_correction`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddCorrectionArgs {
    pub slide_number: usize,
    pub shape_name: String,
    #[serde(default)]
    pub shape_index: Option<usize>,
    pub original_text: String,
    pub corrected_text: String,
    pub correction_type: CorrectionCategory,
    pub reasoning: String,
}
