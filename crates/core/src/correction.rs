//! Correction records — one proposed change each.
//!
//! A `Correction` is immutable once created: it is appended to the pending
//! list by the proposal step and moved to the applied list only after the
//! applier persists the document. A re-correction is a brand-new record.

use serde::{Deserialize, Serialize};

/// What kind of change a correction carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionCategory {
    Spelling,
    Grammar,
    /// `corrected_text` is an EMU left position, not text
    Alignment,
    Formatting,
}

impl CorrectionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionCategory::Spelling => "spelling",
            CorrectionCategory::Grammar => "grammar",
            CorrectionCategory::Alignment => "alignment",
            CorrectionCategory::Formatting => "formatting",
        }
    }
}

impl std::fmt::Display for CorrectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One proposed change to the presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// 1-based slide ordinal
    pub slide_number: usize,

    /// Display name of the target shape (not guaranteed unique)
    pub shape_name: String,

    /// Stable shape ordinal from extraction; resolves the first-match
    /// ambiguity of `shape_name` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_index: Option<usize>,

    /// Substring to replace (text categories) or the current value
    pub original_text: String,

    /// Replacement text, or an EMU integer for `alignment`
    pub corrected_text: String,

    pub category: CorrectionCategory,

    /// Free-text justification from the proposal step
    pub reasoning: String,
}
