//! Correction Applier.
//!
//! Applies a batch of pending corrections against a *fresh* read of the
//! input document — never the handle used for extraction — then persists a
//! single corrected copy. Out-of-range slides, unresolved shapes, absent
//! text, and unparsable alignment values are skipped and reported; only a
//! failed save is fatal.

use serde::Serialize;
use tracing::warn;

use deckproof_core::{Correction, CorrectionCategory, DocumentError};

use crate::package::Package;

/// One successfully applied correction.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedChange {
    pub slide_number: usize,
    pub shape_name: String,
    pub category: String,
    pub original_text: String,
    pub corrected_text: String,
    /// Runs changed (text categories) or 1 for an alignment move
    pub replacements: usize,
}

/// A correction that could not be applied, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedCorrection {
    pub slide_number: usize,
    pub shape_name: String,
    pub reason: String,
}

/// What an apply pass did.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub applied: Vec<AppliedChange>,
    pub skipped: Vec<SkippedCorrection>,
    pub output_path: String,
}

impl ApplyReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

/// Apply `corrections` to the document at `input` and save the result to
/// `output`. The caller is responsible for draining its pending list only
/// after this returns Ok.
pub fn apply_corrections(
    corrections: &[Correction],
    input: &str,
    output: &str,
) -> Result<ApplyReport, DocumentError> {
    let mut report = ApplyReport {
        applied: Vec::new(),
        skipped: Vec::new(),
        output_path: output.to_string(),
    };
    // Nothing pending: leave the document alone entirely.
    if corrections.is_empty() {
        return Ok(report);
    }

    let mut package = Package::open(input)?;

    for correction in corrections {
        let skip = |reason: &str| SkippedCorrection {
            slide_number: correction.slide_number,
            shape_name: correction.shape_name.clone(),
            reason: reason.to_string(),
        };

        let Some(slide_idx) = correction.slide_number.checked_sub(1) else {
            warn!(slide = correction.slide_number, "Correction targets slide 0");
            report.skipped.push(skip("slide out of range"));
            continue;
        };
        let Some(slide) = package.presentation_mut().slide_mut(slide_idx) else {
            warn!(
                slide = correction.slide_number,
                "Correction targets a slide past the end of the deck"
            );
            report.skipped.push(skip("slide out of range"));
            continue;
        };

        // Stable ordinal wins; fall back to first name match in shape order.
        let shape_idx = match correction.shape_index {
            Some(idx) if idx < slide.shapes().len() => Some(idx),
            Some(_) => None,
            None => slide
                .shapes()
                .iter()
                .position(|s| s.name() == correction.shape_name),
        };
        let Some(shape_idx) = shape_idx else {
            warn!(
                slide = correction.slide_number,
                shape = %correction.shape_name,
                "Correction shape not found"
            );
            report.skipped.push(skip("shape not found"));
            continue;
        };

        match correction.category {
            CorrectionCategory::Alignment => {
                match correction.corrected_text.trim().parse::<i64>() {
                    Ok(left) => {
                        slide.set_shape_left(shape_idx, left);
                        report.applied.push(AppliedChange {
                            slide_number: correction.slide_number,
                            shape_name: correction.shape_name.clone(),
                            category: correction.category.to_string(),
                            original_text: correction.original_text.clone(),
                            corrected_text: correction.corrected_text.clone(),
                            replacements: 1,
                        });
                    }
                    Err(_) => {
                        warn!(
                            value = %correction.corrected_text,
                            "Alignment correction is not an EMU integer"
                        );
                        report.skipped.push(skip("bad alignment value"));
                    }
                }
            }
            _ => {
                let original = correction.original_text.as_str();
                let corrected = correction.corrected_text.as_str();
                let replacements = slide.update_text_runs(shape_idx, |text| {
                    text.contains(original)
                        .then(|| text.replace(original, corrected))
                });
                if replacements == 0 {
                    warn!(
                        slide = correction.slide_number,
                        shape = %correction.shape_name,
                        text = %correction.original_text,
                        "Correction text not found in shape runs"
                    );
                    report.skipped.push(skip("text not found"));
                } else {
                    report.applied.push(AppliedChange {
                        slide_number: correction.slide_number,
                        shape_name: correction.shape_name.clone(),
                        category: correction.category.to_string(),
                        original_text: correction.original_text.clone(),
                        corrected_text: correction.corrected_text.clone(),
                        replacements,
                    });
                }
            }
        }
    }

    package.save(output)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::fixtures::deck_bytes;

    fn write_deck(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("deck.pptx");
        std::fs::write(&path, deck_bytes()).unwrap();
        path
    }

    fn correction(
        slide: usize,
        shape: &str,
        original: &str,
        corrected: &str,
        category: CorrectionCategory,
    ) -> Correction {
        Correction {
            slide_number: slide,
            shape_name: shape.into(),
            shape_index: None,
            original_text: original.into(),
            corrected_text: corrected.into(),
            category,
            reasoning: "test".into(),
        }
    }

    #[test]
    fn scoped_substring_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(&dir);
        let output = dir.path().join("out.pptx");

        let corrections = vec![correction(
            1,
            "Title 1",
            "Teh",
            "the",
            CorrectionCategory::Spelling,
        )];
        let report = apply_corrections(
            &corrections,
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(report.applied_count(), 1);
        assert!(report.skipped.is_empty());

        let reopened = Package::open(&output).unwrap();
        let title = &reopened.presentation().slides()[0].shapes()[0];
        // Only the targeted substring changed; the other typos remain.
        assert_eq!(
            title.text_frame().unwrap().paragraphs()[0].text(),
            "the quikc tets"
        );
    }

    #[test]
    fn absent_text_is_skipped_not_applied() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(&dir);
        let output = dir.path().join("out.pptx");

        let corrections = vec![correction(
            1,
            "Title 1",
            "nowhere",
            "anywhere",
            CorrectionCategory::Spelling,
        )];
        let report = apply_corrections(
            &corrections,
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(report.applied_count(), 0);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, "text not found");

        let reopened = Package::open(&output).unwrap();
        assert_eq!(
            reopened.presentation().slides()[0].shapes()[0]
                .text_frame()
                .unwrap()
                .paragraphs()[0]
                .text(),
            "Teh quikc tets"
        );
    }

    #[test]
    fn out_of_range_slide_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(&dir);
        let output = dir.path().join("out.pptx");

        let corrections = vec![
            correction(99, "Title 1", "Teh", "the", CorrectionCategory::Spelling),
            correction(0, "Title 1", "Teh", "the", CorrectionCategory::Spelling),
        ];
        let report = apply_corrections(
            &corrections,
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(report.applied_count(), 0);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped.iter().all(|s| s.reason == "slide out of range"));
    }

    #[test]
    fn alignment_moves_shape_left() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(&dir);
        let output = dir.path().join("out.pptx");

        let corrections = vec![correction(
            3,
            "Title 3",
            "1500000",
            "914400",
            CorrectionCategory::Alignment,
        )];
        let report = apply_corrections(
            &corrections,
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        )
        .unwrap();
        assert_eq!(report.applied_count(), 1);

        let reopened = Package::open(&output).unwrap();
        assert_eq!(reopened.presentation().slides()[2].shapes()[0].left(), 914_400);
    }

    #[test]
    fn bad_alignment_value_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(&dir);
        let output = dir.path().join("out.pptx");

        let corrections = vec![correction(
            3,
            "Title 3",
            "1500000",
            "not-a-number",
            CorrectionCategory::Alignment,
        )];
        let report = apply_corrections(
            &corrections,
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        )
        .unwrap();
        assert_eq!(report.applied_count(), 0);
        assert_eq!(report.skipped[0].reason, "bad alignment value");

        let reopened = Package::open(&output).unwrap();
        assert_eq!(reopened.presentation().slides()[2].shapes()[0].left(), 1_500_000);
    }

    #[test]
    fn duplicate_name_hits_first_shape_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(&dir);
        let output = dir.path().join("out.pptx");

        // Slide 1 has two shapes named "Body", both reading "first body".
        let corrections = vec![correction(
            1,
            "Body",
            "first",
            "FIRST",
            CorrectionCategory::Spelling,
        )];
        apply_corrections(
            &corrections,
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        )
        .unwrap();

        let reopened = Package::open(&output).unwrap();
        let shapes = reopened.presentation().slides()[0].shapes();
        assert_eq!(
            shapes[1].text_frame().unwrap().paragraphs()[0].text(),
            "FIRST body"
        );
        assert_eq!(
            shapes[2].text_frame().unwrap().paragraphs()[0].text(),
            "first body"
        );
    }

    #[test]
    fn shape_index_addresses_second_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(&dir);
        let output = dir.path().join("out.pptx");

        let mut c = correction(1, "Body", "first", "FIRST", CorrectionCategory::Spelling);
        c.shape_index = Some(2);
        apply_corrections(&[c], input.to_str().unwrap(), output.to_str().unwrap()).unwrap();

        let reopened = Package::open(&output).unwrap();
        let shapes = reopened.presentation().slides()[0].shapes();
        assert_eq!(
            shapes[1].text_frame().unwrap().paragraphs()[0].text(),
            "first body"
        );
        assert_eq!(
            shapes[2].text_frame().unwrap().paragraphs()[0].text(),
            "FIRST body"
        );
    }

    #[test]
    fn second_apply_pass_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(&dir);
        let output = dir.path().join("out.pptx");

        let corrections = vec![correction(
            1,
            "Title 1",
            "Teh",
            "the",
            CorrectionCategory::Spelling,
        )];
        apply_corrections(
            &corrections,
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        )
        .unwrap();
        let first = std::fs::read(&output).unwrap();
        let first_content = extract(&Package::open(&output).unwrap()).unwrap();

        // A drained pending list means the second pass gets no corrections.
        let report =
            apply_corrections(&[], input.to_str().unwrap(), output.to_str().unwrap()).unwrap();
        assert_eq!(report.applied_count(), 0);

        let second_content = extract(&Package::open(&output).unwrap()).unwrap();
        assert_eq!(first_content, second_content);
        let second = std::fs::read(&output).unwrap();
        assert_eq!(first, second);
    }
}
