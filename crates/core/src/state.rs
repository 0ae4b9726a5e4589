//! The review session state.
//!
//! Exactly one `AgentState` exists per run. It is mutated exclusively by
//! tool executions inside the loop; it is never shared across concurrent
//! runs. The invariant that matters: corrections are applied only while in
//! `pending_corrections`, and a successful apply pass drains `pending` into
//! `applied`.

use serde::{Deserialize, Serialize};

use crate::content::SlideContent;
use crate::correction::Correction;
use crate::message::Message;

/// Mutable session state for one review run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    /// Path of the input presentation
    pub presentation_path: String,

    /// Path the corrected copy is written to
    pub output_path: String,

    /// Extracted content, populated by the extract tool
    #[serde(default)]
    pub slides_content: Vec<SlideContent>,

    /// Proposed corrections not yet persisted
    #[serde(default)]
    pub pending_corrections: Vec<Correction>,

    /// Corrections confirmed persisted to the output document
    #[serde(default)]
    pub applied_corrections: Vec<Correction>,

    /// Coarse label of what the loop is currently doing
    pub current_task: String,

    /// Loop iterations performed so far
    pub iteration: u32,

    /// Set by the `mark_complete` tool
    pub is_complete: bool,

    /// Full transcript exchanged with the model; append-only
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl AgentState {
    pub fn new(presentation_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            presentation_path: presentation_path.into(),
            output_path: output_path.into(),
            slides_content: Vec::new(),
            pending_corrections: Vec::new(),
            applied_corrections: Vec::new(),
            current_task: "analyze".into(),
            iteration: 0,
            is_complete: false,
            messages: Vec::new(),
        }
    }

    /// Move every pending correction into the applied list.
    ///
    /// Called by the apply tool after the document was persisted — never
    /// before.
    pub fn commit_pending(&mut self) -> usize {
        let n = self.pending_corrections.len();
        self.applied_corrections
            .append(&mut self.pending_corrections);
        n
    }
}

/// What a finished run reports, regardless of how it terminated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Iterations the loop performed
    pub iterations: u32,

    /// Whether the model signalled completion (false on budget exhaustion)
    pub completed: bool,

    /// Corrections confirmed persisted
    pub corrections_applied: usize,

    /// Where the corrected copy was written
    pub output_path: String,

    /// Per-item before/after detail
    pub details: Vec<Correction>,
}

impl RunSummary {
    pub fn from_state(state: &AgentState) -> Self {
        Self {
            iterations: state.iteration,
            completed: state.is_complete,
            corrections_applied: state.applied_corrections.len(),
            output_path: state.output_path.clone(),
            details: state.applied_corrections.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::CorrectionCategory;

    fn correction(orig: &str) -> Correction {
        Correction {
            slide_number: 1,
            shape_name: "Title 1".into(),
            shape_index: None,
            original_text: orig.into(),
            corrected_text: "fixed".into(),
            category: CorrectionCategory::Spelling,
            reasoning: "test".into(),
        }
    }

    #[test]
    fn new_state_is_empty() {
        let state = AgentState::new("in.pptx", "out.pptx");
        assert_eq!(state.iteration, 0);
        assert!(!state.is_complete);
        assert!(state.pending_corrections.is_empty());
        assert!(state.messages.is_empty());
    }

    #[test]
    fn commit_pending_drains_into_applied() {
        let mut state = AgentState::new("in.pptx", "out.pptx");
        state.pending_corrections.push(correction("teh"));
        state.pending_corrections.push(correction("wich"));

        let n = state.commit_pending();
        assert_eq!(n, 2);
        assert!(state.pending_corrections.is_empty());
        assert_eq!(state.applied_corrections.len(), 2);

        // Second commit is a no-op
        assert_eq!(state.commit_pending(), 0);
        assert_eq!(state.applied_corrections.len(), 2);
    }

    #[test]
    fn summary_reflects_terminal_state() {
        let mut state = AgentState::new("in.pptx", "out.pptx");
        state.iteration = 20;
        state.pending_corrections.push(correction("teh"));
        state.commit_pending();

        let summary = RunSummary::from_state(&state);
        assert_eq!(summary.iterations, 20);
        assert!(!summary.completed);
        assert_eq!(summary.corrections_applied, 1);
        assert_eq!(summary.details[0].original_text, "teh");
    }
}
