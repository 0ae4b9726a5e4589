//! Tool execution against the session state.
//!
//! Tools run strictly sequentially within a loop iteration, each one
//! reading and writing the single `AgentState`. Malformed or unknown tool
//! requests become error results on the transcript so the model can
//! recover; document extraction and persistence failures abort the run.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use deckproof_core::correction::Correction;
use deckproof_core::error::ToolError;
use deckproof_core::message::MessageToolCall;
use deckproof_core::provider::Provider;
use deckproof_core::state::AgentState;
use deckproof_core::Error;

use deckproof_pptx::{Package, apply_corrections, extract};

use crate::alignment;
use crate::analyze;
use crate::kind::{AddCorrectionArgs, AnalyzeTextArgs, ToolKind};

/// The outcome of one tool call, destined for the transcript.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub payload: serde_json::Value,
}

impl ToolOutput {
    pub fn ok(payload: serde_json::Value) -> Self {
        Self {
            success: true,
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: json!({ "error": message.into() }),
        }
    }

    /// The JSON string appended to the transcript.
    pub fn to_transcript(&self) -> String {
        self.payload.to_string()
    }
}

/// Executes tool calls for one review run.
pub struct ToolExecutor {
    provider: Arc<dyn Provider>,
    model: String,
}

impl ToolExecutor {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Run one tool call. `Ok` carries the transcript payload — including
    /// recovered argument errors; `Err` is fatal to the run (document
    /// unreadable, save failed).
    pub async fn execute(
        &self,
        state: &mut AgentState,
        call: &MessageToolCall,
    ) -> Result<ToolOutput, Error> {
        let Some(kind) = ToolKind::from_name(&call.name) else {
            warn!(tool = %call.name, "Model requested an unknown tool");
            let err = ToolError::UnknownTool(call.name.clone());
            return Ok(ToolOutput::error(err.to_string()));
        };

        debug!(tool = kind.name(), "Executing tool");

        match kind {
            ToolKind::ExtractSlideContent => {
                let package = Package::open(&state.presentation_path)?;
                state.slides_content = extract(&package)?;
                state.current_task = "analyze".into();
                Ok(ToolOutput::ok(json!({
                    "total_slides": state.slides_content.len(),
                    "slides": state.slides_content,
                })))
            }

            ToolKind::AnalyzeTextForErrors => {
                let args: AnalyzeTextArgs = match parse_args(&call.arguments) {
                    Ok(args) => args,
                    Err(e) => return Ok(ToolOutput::error(e.to_string())),
                };
                match analyze::analyze_text(
                    self.provider.as_ref(),
                    &self.model,
                    args.slide_number,
                    &args.text,
                )
                .await
                {
                    Ok(verdict) => Ok(ToolOutput::ok(serde_json::to_value(verdict)?)),
                    Err(e) => {
                        warn!(error = %e, "Text analysis call failed");
                        let err = ToolError::ExecutionFailed {
                            tool_name: kind.name().to_string(),
                            reason: e.to_string(),
                        };
                        Ok(ToolOutput::error(err.to_string()))
                    }
                }
            }

            ToolKind::AnalyzeAlignment => {
                let package = Package::open(&state.presentation_path)?;
                let report = alignment::analyze(&alignment::title_positions(&package));
                Ok(ToolOutput::ok(serde_json::to_value(report)?))
            }

            ToolKind::AddCorrection => {
                let args: AddCorrectionArgs = match parse_args(&call.arguments) {
                    Ok(args) => args,
                    Err(e) => return Ok(ToolOutput::error(e.to_string())),
                };
                let correction = Correction {
                    slide_number: args.slide_number,
                    shape_name: args.shape_name,
                    shape_index: args.shape_index,
                    original_text: args.original_text,
                    corrected_text: args.corrected_text,
                    category: args.correction_type,
                    reasoning: args.reasoning,
                };
                let summary = json!({
                    "status": "added",
                    "correction": {
                        "slide": correction.slide_number,
                        "shape": correction.shape_name,
                        "type": correction.category.as_str(),
                        "original": correction.original_text,
                        "corrected": correction.corrected_text,
                    }
                });
                state.pending_corrections.push(correction);
                Ok(ToolOutput::ok(summary))
            }

            ToolKind::ApplyAllCorrections => {
                if state.pending_corrections.is_empty() {
                    return Ok(ToolOutput::ok(json!({
                        "status": "no_corrections",
                        "message": "No corrections to apply",
                    })));
                }

                let report = apply_corrections(
                    &state.pending_corrections,
                    &state.presentation_path,
                    &state.output_path,
                )?;
                state.commit_pending();
                state.current_task = "apply".into();

                Ok(ToolOutput::ok(json!({
                    "status": "success",
                    "corrections_applied": report.applied_count(),
                    "details": report.applied,
                    "skipped": report.skipped,
                    "output_file": state.output_path,
                })))
            }

            ToolKind::MarkComplete => {
                state.is_complete = true;
                state.current_task = "complete".into();
                Ok(ToolOutput::ok(json!({
                    "status": "complete",
                    "total_corrections": state.applied_corrections.len(),
                    "output_file": state.output_path,
                })))
            }
        }
    }
}

/// Deserialize the model's raw argument JSON into a typed struct. The
/// model's output is untrusted: missing fields, wrong types, and unknown
/// fields are all rejected here, before any handler runs.
fn parse_args<T: DeserializeOwned>(raw: &str) -> Result<T, ToolError> {
    let raw = if raw.trim().is_empty() { "{}" } else { raw };
    serde_json::from_str(raw).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}
