//! The review loop implementation.
//!
//! Each iteration sends the full transcript plus the tool schema to the
//! model and executes whatever tool calls come back, strictly in order,
//! against the shared session state. The loop ends when the model calls
//! `mark_complete` or when the iteration budget runs out — the latter is a
//! reported outcome, not an error, and a run summary is produced either
//! way.

use std::sync::Arc;

use tracing::{debug, info, warn};

use deckproof_config::ReviewConfig;
use deckproof_core::message::Message;
use deckproof_core::provider::{Provider, ProviderRequest, ToolDefinition};
use deckproof_core::state::{AgentState, RunSummary};
use deckproof_core::Error;
use deckproof_tools::{ToolExecutor, ToolKind};

const SYSTEM_PROMPT: &str = r#"You are a PowerPoint Review Agent. Your job is to review and correct PowerPoint presentations.

Your workflow:
1. First, call extract_slide_content to get all the text from the presentation
2. For each piece of text, call analyze_text_for_errors to check for spelling/grammar issues
3. Call analyze_alignment to check for alignment inconsistencies
4. For each error found, call add_correction to queue the fix
5. Once all errors are identified, call apply_all_corrections to save the fixed presentation
6. Finally, call mark_complete to finish

IMPORTANT RULES:
- Only fix clear spelling and grammar errors
- Do NOT change technical terms or business jargon
- Do NOT rewrite for style - only fix actual errors
- Preserve original meaning
- Be thorough - check ALL text on ALL slides

Process each slide systematically. After analyzing all content and applying corrections, mark the task complete."#;

/// The bounded agent loop driving one review run.
pub struct ReviewLoop {
    provider: Arc<dyn Provider>,
    executor: ToolExecutor,
    tool_definitions: Vec<ToolDefinition>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    max_iterations: u32,
}

impl ReviewLoop {
    /// Build a loop from an explicit configuration value.
    pub fn new(provider: Arc<dyn Provider>, config: &ReviewConfig) -> Self {
        Self {
            executor: ToolExecutor::new(provider.clone(), &config.model),
            tool_definitions: ToolKind::definitions(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_iterations: config.max_iterations,
            provider,
        }
    }

    /// Run the review until completion or budget exhaustion.
    pub async fn run(&self, state: &mut AgentState) -> Result<RunSummary, Error> {
        if state.messages.is_empty() {
            state.messages.push(Message::system(SYSTEM_PROMPT));
            state.messages.push(Message::user(format!(
                "Please review and correct the PowerPoint presentation at: {}\nSave the corrected version to: {}",
                state.presentation_path, state.output_path
            )));
        }

        info!(
            input = %state.presentation_path,
            output = %state.output_path,
            max_iterations = self.max_iterations,
            "Starting review run"
        );

        while !state.is_complete && state.iteration < self.max_iterations {
            state.iteration += 1;
            debug!(iteration = state.iteration, "Review loop iteration");

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: state.messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: self.tool_definitions.clone(),
                tool_choice: Some("auto".into()),
                json_response: false,
            };

            let response = self.provider.complete(request).await?;
            let tool_calls = response.message.tool_calls.clone();

            if tool_calls.is_empty() && !response.message.content.is_empty() {
                debug!(
                    content = %truncate(&response.message.content, 200),
                    "Model replied with text only"
                );
            }

            // Assistant message first, then one result per call id.
            state.messages.push(response.message);

            for call in &tool_calls {
                let output = self.executor.execute(state, call).await?;
                if !output.success {
                    warn!(tool = %call.name, "Tool call surfaced an error result");
                }
                state
                    .messages
                    .push(Message::tool_result(&call.id, output.to_transcript()));
            }
        }

        if !state.is_complete {
            warn!(
                iterations = state.iteration,
                "Iteration budget exhausted before completion"
            );
        }

        let summary = RunSummary::from_state(state);
        info!(
            iterations = summary.iterations,
            completed = summary.completed,
            corrections = summary.corrections_applied,
            "Review run finished"
        );
        Ok(summary)
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
