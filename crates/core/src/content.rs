//! Extracted slide content — the plain-data view of a presentation.
//!
//! Created once per extraction pass by the document collaborator and
//! read-only afterwards. No document-library objects cross this boundary.

use serde::{Deserialize, Serialize};

/// Content from a single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideContent {
    /// 1-based slide ordinal
    pub slide_number: usize,

    /// Shapes carrying text or a table, in shape order
    pub shapes: Vec<ShapeInfo>,

    /// Speaker notes, empty when the slide has none
    #[serde(default)]
    pub notes: String,
}

/// A shape's extracted content and geometry.
///
/// `shape_index` is the shape's ordinal at the document-library boundary —
/// stable across extraction and application passes, unlike the display name,
/// which is not guaranteed unique within a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInfo {
    pub shape_index: usize,
    pub name: String,

    /// Geometry in EMU
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,

    /// Non-empty paragraphs of the shape's text frame
    #[serde(default)]
    pub paragraphs: Vec<ParagraphInfo>,

    /// Rectangular grid of cell text, when the shape holds a table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphInfo {
    pub text: String,
    pub level: u8,

    /// Paragraph alignment keyword (e.g. "ctr", "r") when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,

    #[serde(default)]
    pub runs: Vec<RunInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_pt: Option<f32>,
}

impl ShapeInfo {
    /// Whether this shape contributes any reviewable content.
    pub fn has_content(&self) -> bool {
        !self.paragraphs.is_empty() || self.table.is_some()
    }
}
