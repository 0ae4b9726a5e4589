//! Content Extractor — flattens the document model into plain data.
//!
//! Pure read: extracting twice from the same package yields identical
//! results. Shapes with neither text nor a table are omitted from the
//! output, but their ordinals are preserved in `shape_index` so corrections
//! can address shapes stably across passes.

use deckproof_core::{DocumentError, ParagraphInfo, RunInfo, ShapeInfo, SlideContent};

use crate::model::Shape;
use crate::package::Package;

/// Extract every slide's reviewable content.
pub fn extract(package: &Package) -> Result<Vec<SlideContent>, DocumentError> {
    let presentation = package.presentation();
    let mut slides = Vec::with_capacity(presentation.slide_count());

    for (idx, slide) in presentation.slides().iter().enumerate() {
        let mut shapes = Vec::new();
        for (shape_index, shape) in slide.shapes().iter().enumerate() {
            let info = shape_info(shape, shape_index);
            if info.has_content() {
                shapes.push(info);
            }
        }

        slides.push(SlideContent {
            slide_number: idx + 1,
            shapes,
            notes: slide.notes().unwrap_or_default().to_string(),
        });
    }

    Ok(slides)
}

fn shape_info(shape: &Shape, shape_index: usize) -> ShapeInfo {
    let paragraphs = shape
        .text_frame()
        .map(|frame| {
            frame
                .paragraphs()
                .iter()
                .filter(|para| !para.text().trim().is_empty())
                .map(|para| ParagraphInfo {
                    text: para.text(),
                    level: para.level(),
                    alignment: para.alignment().map(str::to_string),
                    runs: para
                        .runs()
                        .iter()
                        .filter(|run| !run.text().trim().is_empty())
                        .map(|run| RunInfo {
                            text: run.text().to_string(),
                            bold: run.bold(),
                            italic: run.italic(),
                            font_name: run.font_name().map(str::to_string),
                            size_pt: run.size_pt(),
                        })
                        .collect(),
                })
                .collect()
        })
        .unwrap_or_default();

    ShapeInfo {
        shape_index,
        name: shape.name().to_string(),
        left: shape.left(),
        top: shape.top(),
        width: shape.width(),
        height: shape.height(),
        paragraphs,
        table: shape.table().map(|t| t.grid()),
    }
}
