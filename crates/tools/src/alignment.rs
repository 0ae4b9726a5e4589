//! Title alignment analysis.
//!
//! Finds the most common left position among shapes whose name contains
//! "Title" and reports the ones that deviate. Frequency ties break toward
//! the smallest left value, so repeated runs over the same deck always
//! nominate the same standard.

use std::collections::BTreeMap;

use serde::Serialize;

use deckproof_pptx::Package;

/// Where one title sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlePosition {
    /// 1-based slide ordinal
    pub slide: usize,
    pub name: String,
    pub left: i64,
    pub top: i64,
}

/// The alignment verdict returned to the model.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    pub has_issues: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_left_position: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub misaligned_titles: Vec<TitlePosition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Collect every title position in the deck, in slide order.
pub fn title_positions(package: &Package) -> Vec<TitlePosition> {
    let mut positions = Vec::new();
    for (idx, slide) in package.presentation().slides().iter().enumerate() {
        for shape in slide.shapes() {
            if shape.name().contains("Title") {
                positions.push(TitlePosition {
                    slide: idx + 1,
                    name: shape.name().to_string(),
                    left: shape.left(),
                    top: shape.top(),
                });
            }
        }
    }
    positions
}

/// The most common left position; ties break to the smallest value.
pub fn standard_left(positions: &[TitlePosition]) -> Option<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for pos in positions {
        *counts.entry(pos.left).or_default() += 1;
    }
    // Ascending key order, strictly-greater count: smallest left wins ties.
    let mut best: Option<(i64, usize)> = None;
    for (left, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((left, count));
        }
    }
    best.map(|(left, _)| left)
}

/// Analyze a set of title positions.
pub fn analyze(positions: &[TitlePosition]) -> AlignmentReport {
    let Some(standard) = standard_left(positions) else {
        return AlignmentReport {
            has_issues: false,
            standard_left_position: None,
            misaligned_titles: Vec::new(),
            recommendation: None,
            message: Some("No titles found".into()),
        };
    };

    let misaligned: Vec<TitlePosition> = positions
        .iter()
        .filter(|p| p.left != standard)
        .cloned()
        .collect();

    AlignmentReport {
        has_issues: !misaligned.is_empty(),
        standard_left_position: Some(standard),
        recommendation: Some(format!(
            "Align all titles to left position {standard} EMUs"
        )),
        misaligned_titles: misaligned,
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(slide: usize, left: i64) -> TitlePosition {
        TitlePosition {
            slide,
            name: format!("Title {slide}"),
            left,
            top: 457_200,
        }
    }

    #[test]
    fn majority_position_wins() {
        let positions = vec![position(1, 100), position(2, 100), position(3, 250)];
        let report = analyze(&positions);
        assert!(report.has_issues);
        assert_eq!(report.standard_left_position, Some(100));
        assert_eq!(report.misaligned_titles.len(), 1);
        assert_eq!(report.misaligned_titles[0].slide, 3);
        assert_eq!(report.misaligned_titles[0].left, 250);
    }

    #[test]
    fn frequency_tie_breaks_to_smallest_left() {
        let positions = vec![position(1, 250), position(2, 100)];
        assert_eq!(standard_left(&positions), Some(100));

        // Larger tie, same rule
        let positions = vec![
            position(1, 300),
            position(2, 300),
            position(3, 100),
            position(4, 100),
        ];
        assert_eq!(standard_left(&positions), Some(100));
    }

    #[test]
    fn aligned_deck_has_no_issues() {
        let positions = vec![position(1, 100), position(2, 100)];
        let report = analyze(&positions);
        assert!(!report.has_issues);
        assert!(report.misaligned_titles.is_empty());
        assert_eq!(report.standard_left_position, Some(100));
    }

    #[test]
    fn no_titles_reports_a_message() {
        let report = analyze(&[]);
        assert!(!report.has_issues);
        assert_eq!(report.standard_left_position, None);
        assert_eq!(report.message.as_deref(), Some("No titles found"));
    }

    #[test]
    fn report_serializes_like_the_tool_contract() {
        let report = analyze(&[position(1, 100), position(2, 250)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["has_issues"], true);
        assert_eq!(json["standard_left_position"], 100);
        assert_eq!(json["misaligned_titles"][0]["left"], 250);
    }
}
